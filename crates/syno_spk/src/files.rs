//! Listing the installed files held in `package.tgz`

use flate2::read::MultiGzDecoder;
use std::io::Read;
use tracing::{instrument, trace};

use crate::error::Result;

/// Decompress a gzip'd tar stream and collect the names of its members.
///
/// Member contents are skipped, never read. Names are returned in archive order, including
/// directories and any duplicates. Concatenated gzip members are decoded as one stream. The list is fully built before returning so the caller is free to
/// release the stream; any decompression or archive error fails the whole call.
#[instrument(skip(reader), err)]
pub fn list_files<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = tar::Archive::new(MultiGzDecoder::new(reader));

    let mut files = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        trace!(name, "found packaged file");
        files.push(name);
    }

    Ok(files)
}
