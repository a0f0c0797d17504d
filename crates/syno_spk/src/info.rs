//! Parsing of the `INFO` manifest

use std::io::{BufRead, BufReader, Read};
use tracing::{instrument, trace};

use crate::{
    error::{Error, Result},
    types::{CaseInsensitiveMap, InfoValue, PackageInfo},
};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse an `INFO` manifest into its key/value pairs.
///
/// ```
/// let info = syno_spk::info::parse_info(&b"package=\"Example\"\nversion=42\n"[..])?;
///
/// assert_eq!(info.get_str("Package"), Some("Example"));
/// assert_eq!(info.get_integer("VERSION"), Some(42));
/// # Ok::<(), syno_spk::error::Error>(())
/// ```
#[instrument(skip(reader), err)]
pub fn parse_info<R: Read>(reader: R) -> Result<PackageInfo> {
    let mut entries = CaseInsensitiveMap::new();

    for (number, line) in BufReader::new(reader).split(b'\n').enumerate() {
        let line = line?;
        // Bytes that are not UTF-8 become U+FFFD rather than failing the package
        let line = String::from_utf8_lossy(&line);
        let mut line = line.strip_suffix('\r').unwrap_or(&line);
        if number == 0 {
            line = line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(line);
        }

        if let Some((key, value)) = parse_line(line)? {
            trace!(key, %value, "parsed info line");
            entries.insert(key, value);
        }
    }

    Ok(PackageInfo::new(entries))
}

/// Split a single manifest line into its key and value.
///
/// Returns `None` for lines without an `=`.
pub fn parse_line(line: &str) -> Result<Option<(&str, InfoValue)>> {
    let Some((key, value)) = line.split_once('=') else {
        return Ok(None);
    };

    Ok(Some((key.trim(), parse_value(line, value.trim())?)))
}

fn parse_value(line: &str, value: &str) -> Result<InfoValue> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Ok(InfoValue::Text(value[1..value.len() - 1].to_owned()));
    }

    value
        .parse::<i64>()
        .map(InfoValue::Integer)
        .map_err(|_| Error::MalformedInfoLine(line.to_owned()))
}
