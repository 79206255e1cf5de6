//! Path validation
//!
//! Pure checks on caller-supplied paths. Nothing in here touches the filesystem.

use std::path::PathBuf;

use crate::error::ServeError;

/// Returns true if the raw path starts like an absolute path
fn has_absolute_prefix(raw: &str) -> bool {
    raw.starts_with('/') || raw.starts_with('\\') || has_drive_prefix(raw)
}

/// Drive prefixes such as `C:` or `c:\`
#[cfg(windows)]
fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

// `a:b.txt` is an ordinary file name outside Windows.
#[cfg(not(windows))]
fn has_drive_prefix(_raw: &str) -> bool {
    false
}

/// Validates a requested path and returns it normalized relative to the storage root.
///
/// Empty and `.` segments are dropped. Both `/` and `\` count as separators so a
/// backslash cannot smuggle a `..` segment past the check.
pub fn validate_requested_path(raw: &str) -> Result<PathBuf, ServeError> {
    if raw.contains('\0') {
        return Err(ServeError::InvalidPath("NUL byte in path".into()));
    }

    if has_absolute_prefix(raw) {
        return Err(ServeError::InvalidPath(format!("absolute path: {}", raw)));
    }

    let mut normalized = PathBuf::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(ServeError::InvalidPath(format!("traversal attempt: {}", raw)));
            }
            s => normalized.push(s),
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(ServeError::InvalidPath("Empty path".into()));
    }

    Ok(normalized)
}
