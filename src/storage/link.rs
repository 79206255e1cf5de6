//! Public link
//!
//! Creates a symbolic link from a public directory to the storage root so a
//! front web server can serve the files directly.

use log::info;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::StorageError;
use crate::storage::root::StorageRoot;

/// Outcome of a link request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    AlreadyLinked,
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Link `link` to the storage root. Calling it again for the same pair is a no-op.
pub fn create_public_link(root: &StorageRoot, link: &Path) -> Result<LinkOutcome, StorageError> {
    match fs::symlink_metadata(link) {
        Ok(metadata) => {
            if metadata.file_type().is_symlink() {
                // A dangling link canonicalizes with an error; treat it as a conflict.
                if let Ok(target) = link.canonicalize() {
                    if target == root.path() {
                        info!(
                            "Public link {} already points at {}",
                            link.display(),
                            root.path().display()
                        );
                        return Ok(LinkOutcome::AlreadyLinked);
                    }
                }
            }
            Err(StorageError::LinkConflict(link.to_path_buf()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = link.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            symlink_dir(root.path(), link)?;
            info!(
                "Created public link {} -> {}",
                link.display(),
                root.path().display()
            );
            Ok(LinkOutcome::Created)
        }
        Err(e) => Err(StorageError::IoError(e)),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_create_link_then_idempotent() {
        let storage = tempfile::tempdir().unwrap();
        fs::write(storage.path().join("1.jpg"), b"jpeg").unwrap();
        let root = StorageRoot::open(storage.path()).unwrap();

        let public = tempfile::tempdir().unwrap();
        let link = public.path().join("nested/storage");

        assert_eq!(
            create_public_link(&root, &link).unwrap(),
            LinkOutcome::Created
        );
        assert_eq!(fs::read(link.join("1.jpg")).unwrap(), b"jpeg");

        assert_eq!(
            create_public_link(&root, &link).unwrap(),
            LinkOutcome::AlreadyLinked
        );
    }

    #[test]
    fn test_existing_directory_conflicts() {
        let storage = tempfile::tempdir().unwrap();
        let root = StorageRoot::open(storage.path()).unwrap();

        let public = tempfile::tempdir().unwrap();
        let link = public.path().join("storage");
        fs::create_dir(&link).unwrap();

        assert!(matches!(
            create_public_link(&root, &link),
            Err(StorageError::LinkConflict(_))
        ));
    }

    #[test]
    fn test_link_to_other_target_conflicts() {
        let storage = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let root = StorageRoot::open(storage.path()).unwrap();

        let public = tempfile::tempdir().unwrap();
        let link = public.path().join("storage");
        std::os::unix::fs::symlink(other.path(), &link).unwrap();

        assert!(matches!(
            create_public_link(&root, &link),
            Err(StorageError::LinkConflict(_))
        ));
    }
}
