//! Entry name handling for zip archives
//!
//! Zip entry names always use forward slashes (`/`) as separators,
//! regardless of the host operating system (APPNOTE 4.4.17). Names are
//! normalized when entries are added so archives written on Windows read
//! the same everywhere.
//!
//! # Examples
//!
//! ```
//! use fixture_zip::path::normalize_entry_name;
//!
//! assert_eq!(normalize_entry_name("dir\\file.txt").unwrap(), "dir/file.txt");
//! assert!(normalize_entry_name("/etc/passwd").is_err());
//! ```

use crate::{Error, Result};

/// Normalize and validate a name for storage in a zip archive
///
/// Backslashes are converted to forward slashes. Empty names, absolute
/// paths, `..` components and names longer than the 16-bit length field
/// are rejected.
pub fn normalize_entry_name(name: &str) -> Result<String> {
    let normalized = name.replace('\\', "/");

    let reason = if normalized.is_empty() {
        Some("name is empty")
    } else if normalized.starts_with('/') {
        Some("name is an absolute path")
    } else if normalized.split('/').any(|component| component == "..") {
        Some("name escapes the archive root")
    } else if normalized.len() > usize::from(u16::MAX) {
        Some("name is longer than 65535 bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidEntryName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(normalized),
    }
}
