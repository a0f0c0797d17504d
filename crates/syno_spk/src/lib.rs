//! This library handles reading metadata from **SPK** packages used by *Synology DSM*.
//!
//! # SPK Package Format Documentation
//!
//! An SPK file is a plain (uncompressed) POSIX `tar` archive. The package manager only cares about a
//! handful of its entries, which are identified by name. Entries may appear in any order.
//!
//! ## Reserved Entries
//!
//! | Entry name                 | Matching                     | Description                                        |
//! |----------------------------|------------------------------|----------------------------------------------------|
//! | `INFO`                     | exact, case-sensitive        | Text manifest of `key = value` lines               |
//! | `package.tgz`              | exact, case-sensitive        | Gzip compressed `tar` holding the installed files  |
//! | `PACKAGE_ICON*.PNG`        | prefix/suffix, any case      | Package icons, one per resolution                  |
//!
//! Every other entry (`scripts/`, `conf/`, `WIZARD_UIFILES/`, signatures, ...) is ignored.
//!
//! ### INFO
//!
//! The manifest is UTF-8 text, one pair per line:
//!
//! ```text
//! package="ExamplePkg"
//! version="1.0.0-0001"
//! os_min_ver="7.0-40000"
//! install_dep_packages="WebStation"
//! startable="yes"
//! checksum_count=3
//! ```
//!
//! - Everything before the first `=` is the key, everything after it is the value. Both are trimmed.
//! - A value wrapped in double quotes is text, with the quotes removed.
//! - Any other value must be a base-10 integer.
//! - Lines without `=` are skipped.
//! - Keys are case-insensitive; a later line replaces the value of an earlier one.
//!
//! ### package.tgz
//!
//! A gzip stream wrapping a second `tar` archive. Only the member names are read; they are reported in
//! archive order.
//!
//! ### Icons
//!
//! Any entry whose name starts with `PACKAGE_ICON` and ends with `.PNG`, both compared without regard
//! to case, is captured as raw bytes. DSM ships `PACKAGE_ICON.PNG` (64px) and `PACKAGE_ICON_256.PNG`.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.spk`
//! - **Outer Compression**: none
//! - **Nested Compression**: gzip
//!

pub mod error;
pub mod files;
pub mod icons;
pub mod info;
pub mod read;
pub mod types;

pub use read::{read_package_info, ReadOptions, SpkReader};
pub use types::{CaseInsensitiveMap, InfoValue, PackageIcons, PackageInfo, SpkContents};
