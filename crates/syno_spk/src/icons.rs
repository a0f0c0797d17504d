//! Capturing package icons

use std::io::Read;
use tracing::{debug, instrument};

use crate::{error::Result, types::PackageIcons};

/// Icon entries start with this, in any case
pub const ICON_PREFIX: &str = "PACKAGE_ICON";

/// Icon entries end with this, in any case
pub const ICON_EXTENSION: &str = ".PNG";

/// Whether an entry name identifies a package icon
///
/// ```
/// use syno_spk::icons::is_icon_name;
///
/// assert!(is_icon_name("PACKAGE_ICON_256.PNG"));
/// assert!(is_icon_name("package_icon.png"));
/// assert!(!is_icon_name("PACKAGE_ICON_OTHER.JPG"));
/// ```
pub fn is_icon_name(name: &str) -> bool {
    let name = name.as_bytes();
    let (prefix, extension) = (ICON_PREFIX.as_bytes(), ICON_EXTENSION.as_bytes());

    name.len() >= prefix.len()
        && name.len() >= extension.len()
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}

/// Read an entry into `icons` if its name identifies a package icon.
///
/// Returns whether the entry was captured. Entries that are not icons are left unread.
#[instrument(skip(reader, icons), err)]
pub fn collect_icon<R: Read>(name: &str, mut reader: R, icons: &mut PackageIcons) -> Result<bool> {
    if !is_icon_name(name) {
        return Ok(false);
    }

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    debug!(size = data.len(), "captured icon");

    icons.insert(name, data);
    Ok(true)
}
