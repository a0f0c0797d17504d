//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    ///
    /// Truncated archives, bad checksums and invalid gzip headers all arrive through here.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// a requested entry was never found in the package
    #[error("{0}")]
    MissingEntry(#[from] MissingEntryError),

    /// unrecognized value syntax: {0}
    #[error("unrecognized value syntax: {0}")]
    MalformedInfoLine(String),
}

/// Error type to provide further information when a requested entry is missing
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntryError {
    /// the `INFO` manifest
    #[error("missing manifest entry")]
    Info,

    /// the `package.tgz` archive
    #[error("missing nested archive entry")]
    Package,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
