//! Server core functionality
//!
//! This module contains the HTTP listener, the router and the shared
//! request state.

pub mod core;
pub mod router;

pub use self::core::Server;
pub use router::{AppState, create as create_router};
