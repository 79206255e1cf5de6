//! File system storage management
//!
//! Handles the storage root, path validation, the public link and public URLs.

pub mod link;
pub mod root;
pub mod urls;
pub mod validation;

pub use link::{LinkOutcome, create_public_link};
pub use root::StorageRoot;
pub use urls::public_url;
pub use validation::validate_requested_path;
