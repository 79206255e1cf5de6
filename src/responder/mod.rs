//! Responder module
//!
//! The guarded file responder and the result it hands to the HTTP layer.

mod operations;
mod results;

pub use operations::FileResponder;
pub use results::FileResponse;
