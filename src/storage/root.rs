//! Storage root
//!
//! The single directory every servable file must live under.

use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ServeError, StorageError};

/// Canonicalized storage root, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct StorageRoot {
    canonical: PathBuf,
}

impl StorageRoot {
    /// Open the configured directory as the storage root
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::RootNotFound(path.to_path_buf()),
            _ => StorageError::IoError(e),
        })?;

        if !canonical.is_dir() {
            return Err(StorageError::NotADirectory(canonical));
        }

        Ok(Self { canonical })
    }

    pub fn path(&self) -> &Path {
        &self.canonical
    }

    /// Join a validated relative path onto the root and confirm the canonical
    /// result is still inside it. Symlinks are followed before the check.
    pub fn resolve(&self, relative: &Path) -> Result<PathBuf, ServeError> {
        let joined = self.canonical.join(relative);
        let virtual_path = relative.to_string_lossy().to_string();

        let canonical = match joined.canonicalize() {
            Ok(path) => path,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Err(ServeError::NotFound(virtual_path));
            }
            Err(e) => return Err(ServeError::Io(e)),
        };

        if !canonical.starts_with(&self.canonical) {
            debug!(
                "Resolved path {} escapes storage root {}",
                canonical.display(),
                self.canonical.display()
            );
            return Err(ServeError::InvalidPath(virtual_path));
        }

        Ok(canonical)
    }
}
