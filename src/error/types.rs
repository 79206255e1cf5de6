//! Error types
//!
//! Defines the per-request error taxonomy and the startup error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors a single file request can end with
#[derive(Debug)]
pub enum ServeError {
    InvalidPath(String),
    Unauthorized,
    NotFound(String),
    Io(io::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            ServeError::Unauthorized => write!(f, "Caller is not permitted"),
            ServeError::NotFound(p) => write!(f, "File not found: {}", p),
            ServeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ServeError {}

impl From<io::Error> for ServeError {
    fn from(error: io::Error) -> Self {
        ServeError::Io(error)
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    RootNotFound(PathBuf),
    NotADirectory(PathBuf),
    LinkConflict(PathBuf),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::RootNotFound(p) => {
                write!(f, "Storage root not found: {}", p.display())
            }
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            StorageError::LinkConflict(p) => write!(
                f,
                "Link location already exists and does not point at the storage root: {}",
                p.display()
            ),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Errors that stop the server before it accepts requests
#[derive(Debug)]
pub enum StartupError {
    Config(config::ConfigError),
    Storage(StorageError),
    Bind(String, io::Error),
    Serve(io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "Configuration error: {}", e),
            StartupError::Storage(e) => write!(f, "Storage error: {}", e),
            StartupError::Bind(addr, e) => write!(f, "Failed to bind to {}: {}", addr, e),
            StartupError::Serve(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<config::ConfigError> for StartupError {
    fn from(error: config::ConfigError) -> Self {
        StartupError::Config(error)
    }
}

impl From<StorageError> for StartupError {
    fn from(error: StorageError) -> Self {
        StartupError::Storage(error)
    }
}
