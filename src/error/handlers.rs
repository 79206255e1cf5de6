//! Error handlers
//!
//! Maps request errors to HTTP statuses and logs them at the right level.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error, warn};

use crate::error::types::ServeError;

/// Log a request error
pub fn handle_error(err: &ServeError) {
    match err {
        ServeError::Io(_) => error!("File request failed: {}", err),
        ServeError::NotFound(_) => debug!("File request missed: {}", err),
        _ => warn!("File request rejected: {}", err),
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &ServeError) -> StatusCode {
    match err {
        ServeError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        ServeError::Unauthorized => StatusCode::FORBIDDEN,
        ServeError::NotFound(_) => StatusCode::NOT_FOUND,
        ServeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Error responses never carry a body, so nothing about the filesystem leaks.
impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        handle_error(&self);
        error_to_status(&self).into_response()
    }
}
