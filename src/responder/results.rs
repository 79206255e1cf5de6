//! Responder result types

use mime_guess::Mime;
use tokio::fs::File;

/// An opened file ready to be streamed back to the caller
#[derive(Debug)]
pub struct FileResponse {
    pub file: File,
    pub len: u64,
    pub content_type: Mime,
}
