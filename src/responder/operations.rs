//! Guarded file responder
//!
//! Validates, authorizes, resolves and opens a requested file.

use log::info;
use tokio::fs::{self, File};

use super::results::FileResponse;
use crate::auth::AuthContext;
use crate::error::ServeError;
use crate::storage::{StorageRoot, validate_requested_path};

/// Serves files from one storage root, optionally behind an access check
#[derive(Debug, Clone)]
pub struct FileResponder {
    root: StorageRoot,
    protected: bool,
}

impl FileResponder {
    pub fn new(root: StorageRoot, protected: bool) -> Self {
        Self { root, protected }
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Serves `requested_path` relative to the storage root.
    ///
    /// The authorization check runs before the filesystem is consulted, so a
    /// denied caller cannot tell existing files from missing ones.
    pub async fn serve(
        &self,
        requested_path: &str,
        auth: AuthContext,
    ) -> Result<FileResponse, ServeError> {
        let relative = validate_requested_path(requested_path)?;

        if self.protected && !auth.permitted {
            return Err(ServeError::Unauthorized);
        }

        let virtual_path = relative.to_string_lossy().to_string();
        let real_path = self.root.resolve(&relative)?;

        let metadata = fs::metadata(&real_path).await?;
        if !metadata.is_file() {
            return Err(ServeError::NotFound(virtual_path));
        }

        let file = File::open(&real_path).await?;
        let content_type = mime_guess::from_path(&real_path).first_or_octet_stream();

        info!(
            "Serving {} ({} bytes, {}) from {}",
            virtual_path,
            metadata.len(),
            content_type,
            real_path.display()
        );

        Ok(FileResponse {
            file,
            len: metadata.len(),
            content_type,
        })
    }
}
