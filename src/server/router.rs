//! HTTP router setup
//!
//! Mounts the file route and turns responder results into HTTP responses.

use axum::Router;
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::auth::AccessGuard;
use crate::error::ServeError;
use crate::middleware::log_request;
use crate::responder::{FileResponder, FileResponse};

/// Shared, read-only state handed to every request
pub struct AppState {
    pub responder: FileResponder,
    pub guard: Arc<dyn AccessGuard>,
}

impl AppState {
    pub fn new(responder: FileResponder, guard: Arc<dyn AccessGuard>) -> Self {
        Self { responder, guard }
    }
}

/// Create the application router with the file route under `/{route_prefix}/`
pub fn create(state: Arc<AppState>, route_prefix: &str) -> Router {
    Router::new()
        .route(&format!("/{route_prefix}/{{*path}}"), get(serve_file))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(axum::middleware::from_fn(log_request))
        .with_state(state)
}

async fn serve_file(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ServeError> {
    // Undecodable paths get the same bodiless 400 as traversal attempts.
    let Path(path) = path.map_err(|e| ServeError::InvalidPath(e.body_text()))?;

    let auth = state.guard.check(&headers);
    let file = state.responder.serve(&path, auth).await?;
    Ok(file_response(file))
}

/// Stream an opened file back with its content type and length
fn file_response(file: FileResponse) -> Response {
    let body = Body::from_stream(ReaderStream::new(file.file));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_LENGTH, file.len.to_string()),
        ],
        body,
    )
        .into_response()
}
