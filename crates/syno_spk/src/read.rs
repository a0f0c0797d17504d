//! Types for reading SPK packages

use bon::Builder;
use std::io::Read;
use tracing::{debug, instrument, trace};

use crate::{
    error::{MissingEntryError, Result},
    files::list_files,
    icons::collect_icon,
    info::parse_info,
    types::{PackageIcons, PackageInfo, SpkContents},
};

/// Name of the manifest entry
pub const INFO_ENTRY: &str = "INFO";

/// Name of the compressed archive holding the installed files
pub const PACKAGE_ENTRY: &str = "package.tgz";

/// Selects which parts of a package [`SpkReader::read`] collects.
///
/// Every part is requested unless turned off. A requested manifest or file list that is missing from
/// the package is an error; missing icons never are.
///
/// ```
/// use syno_spk::ReadOptions;
///
/// let options = ReadOptions::builder().icons(false).build();
/// assert!(options.info && options.files && !options.icons);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct ReadOptions {
    /// Parse the `INFO` manifest
    #[builder(default = true)]
    pub info: bool,

    /// List the members of `package.tgz`
    #[builder(default = true)]
    pub files: bool,

    /// Capture `PACKAGE_ICON*.PNG` entries
    #[builder(default = true)]
    pub icons: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            info: true,
            files: true,
            icons: true,
        }
    }
}

impl ReadOptions {
    /// Manifest and icons, without listing files
    pub fn info_only() -> Self {
        Self {
            files: false,
            ..Self::default()
        }
    }

    fn has_info(&self, contents: &SpkContents) -> bool {
        contents.info.is_some() || !self.info
    }

    fn has_files(&self, contents: &SpkContents) -> bool {
        contents.files.is_some() || !self.files
    }

    /// Whether the rest of the package can be skipped.
    ///
    /// Icons may appear anywhere, so once they are requested the whole package has to be read.
    pub fn is_complete(&self, contents: &SpkContents) -> bool {
        self.has_info(contents) && self.has_files(contents) && !self.icons
    }

    /// Fail if a requested manifest or file list was not read.
    pub fn check(&self, contents: &SpkContents) -> Result<()> {
        if !self.has_info(contents) {
            return Err(MissingEntryError::Info.into());
        }
        if !self.has_files(contents) {
            return Err(MissingEntryError::Package.into());
        }
        Ok(())
    }
}

/// SPK package reader
///
/// Reads the package in a single forward pass, so any [`Read`] will do.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_spk_contents(reader: impl Read) -> syno_spk::error::Result<()> {
///     let mut spk = syno_spk::SpkReader::new(reader);
///     let contents = spk.read(syno_spk::ReadOptions::default())?;
///
///     for (key, value) in contents.info.iter().flat_map(|info| info.iter()) {
///         println!("{key} = {value}");
///     }
///     for name in contents.files.iter().flatten() {
///         println!("Filename: {name}");
///     }
///
///     Ok(())
/// }
/// ```
pub struct SpkReader<R> {
    reader: R,
}

impl<R: Read> SpkReader<R> {
    /// Wrap a stream positioned at the start of a package.
    pub fn new(reader: R) -> SpkReader<R> {
        SpkReader { reader }
    }

    /// Walk the package, collecting the parts selected by `options`.
    ///
    /// Stops as soon as everything requested has been read, leaving the stream wherever that was.
    #[instrument(skip(self), err)]
    pub fn read(&mut self, options: ReadOptions) -> Result<SpkContents> {
        let mut contents = SpkContents::default();
        let mut archive = tar::Archive::new(&mut self.reader);

        for entry in archive.entries()? {
            let entry = entry?;

            let kind = entry.header().entry_type();
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            if !(kind.is_file() || kind.is_contiguous()) || entry.size() == 0 {
                trace!(name, ?kind, "skipping entry without data");
                continue;
            }

            match name.as_str() {
                INFO_ENTRY if options.info => {
                    debug!("reading manifest");
                    if contents.info.replace(parse_info(entry)?).is_some() {
                        debug!("replaced previously read manifest");
                    }
                }
                PACKAGE_ENTRY if options.files => {
                    debug!("listing packaged files");
                    let files = list_files(entry)?;
                    debug!(count = files.len(), "listed packaged files");
                    contents.files = Some(files);
                }
                INFO_ENTRY | PACKAGE_ENTRY => trace!(name, "skipping unrequested entry"),
                _ if options.icons => {
                    collect_icon(&name, entry, &mut contents.icons)?;
                }
                _ => trace!(name, "skipping entry"),
            }

            if options.is_complete(&contents) {
                debug!("read everything requested, stopping early");
                return Ok(contents);
            }
        }

        options.check(&contents)?;
        Ok(contents)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Read the manifest and icons of a package, without listing its files.
pub fn read_package_info<R: Read>(reader: R) -> Result<(PackageInfo, PackageIcons)> {
    let (info, icons, _) = SpkReader::new(reader)
        .read(ReadOptions::info_only())?
        .into_parts();

    Ok((info.ok_or(MissingEntryError::Info)?, icons))
}
