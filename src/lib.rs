//! Guarded file storage server
//!
//! Serves files from a private storage directory over HTTP, rejecting path
//! traversal and optionally requiring a token.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod responder;
pub mod server;
pub mod storage;

pub use crate::config::ServerConfig;
pub use auth::{AccessGuard, AllowAll, AuthContext, BearerToken};
pub use error::{ServeError, StartupError, StorageError};
pub use responder::{FileResponder, FileResponse};
pub use server::{AppState, Server, create_router};
pub use storage::StorageRoot;
