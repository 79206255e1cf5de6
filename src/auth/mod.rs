//! Authentication system
//!
//! Access guards that decide whether a caller may read stored files.

pub mod guard;
pub mod validator;

pub use guard::{AccessGuard, AllowAll, AuthContext};
pub use validator::BearerToken;
