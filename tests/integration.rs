use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use file_storage_server::{
    AccessGuard, AllowAll, AppState, BearerToken, FileResponder, StorageRoot, create_router,
};

const TOKEN: &str = "fee-office-token";

// Helper to set up a storage root with a few files
fn setup_storage() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("fee_attachments")).unwrap();
    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    fs::write(tmp.path().join("fee_attachments/1.jpg"), b"\xff\xd8\xff\xe0jpeg-bytes").unwrap();
    fs::write(tmp.path().join("a/b/c.png"), b"\x89PNG\r\n\x1a\nimage").unwrap();
    fs::write(tmp.path().join("notes.txt"), b"hello").unwrap();
    tmp
}

// Helper to build the router over a storage root
fn app(storage: &TempDir, protected: bool) -> Router {
    let root = StorageRoot::open(storage.path()).unwrap();
    let guard: Arc<dyn AccessGuard> = if protected {
        Arc::new(BearerToken::new(TOKEN))
    } else {
        Arc::new(AllowAll)
    };
    let state = Arc::new(AppState::new(FileResponder::new(root, protected), guard));
    create_router(state, "file-storage")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_serves_file_with_content_type() {
    let storage = setup_storage();
    let (status, content_type, body) = get(app(&storage, false), "/file-storage/fee_attachments/1.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(body, b"\xff\xd8\xff\xe0jpeg-bytes");
}

#[tokio::test]
async fn test_nested_round_trip() {
    let storage = setup_storage();
    let source = fs::read(storage.path().join("a/b/c.png")).unwrap();

    let (status, content_type, body) = get(app(&storage, false), "/file-storage/a/b/c.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, source);
}

#[tokio::test]
async fn test_content_length_matches_file() {
    let storage = setup_storage();
    let response = app(&storage, false)
        .oneshot(
            Request::get("/file-storage/notes.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "5"
    );
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}

#[tokio::test]
async fn test_missing_file_is_404_without_body() {
    let storage = setup_storage();
    let (status, _, body) = get(app(&storage, false), "/file-storage/fee_attachments/missing.jpg").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_directory_is_404() {
    let storage = setup_storage();
    let (status, _, body) = get(app(&storage, false), "/file-storage/fee_attachments").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_traversal_is_400_without_body() {
    let storage = setup_storage();
    for uri in [
        "/file-storage/../secrets.txt",
        "/file-storage/a/../../secrets.txt",
        "/file-storage/%2e%2e/secrets.txt",
        "/file-storage/..%2fsecrets.txt",
        "/file-storage/a%5c..%5c..%5csecrets.txt",
        "/file-storage//etc/passwd",
    ] {
        let (status, _, body) = get(app(&storage, false), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert!(body.is_empty(), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_protected_route_denies_without_token() {
    let storage = setup_storage();

    // Existing and missing files look the same to an unauthorized caller
    for uri in [
        "/file-storage/fee_attachments/1.jpg",
        "/file-storage/fee_attachments/missing.jpg",
    ] {
        let (status, _, body) = get(app(&storage, true), uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {uri}");
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_protected_route_rejects_wrong_token() {
    let storage = setup_storage();
    let request = Request::get("/file-storage/notes.txt")
        .header("x-api-key", "guess")
        .body(Body::empty())
        .unwrap();

    let (status, _, _) = send(app(&storage, true), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_serves_with_token() {
    let storage = setup_storage();

    let request = Request::get("/file-storage/notes.txt")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(&storage, true), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello");

    let request = Request::get("/file-storage/fee_attachments/missing.jpg")
        .header("x-api-key", TOKEN)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app(&storage, true), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_routes_are_404() {
    let storage = setup_storage();
    for uri in ["/", "/file-storage", "/file-storage/", "/other/notes.txt"] {
        let (status, _, body) = get(app(&storage, false), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}");
        assert!(body.is_empty(), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_custom_guard_is_injected() {
    let storage = setup_storage();
    let root = StorageRoot::open(storage.path()).unwrap();
    let guard: Arc<dyn AccessGuard> =
        Arc::new(|headers: &axum::http::HeaderMap| headers.contains_key("x-session"));
    let state = Arc::new(AppState::new(FileResponder::new(root, true), guard));
    let app = create_router(state, "files");

    let (status, _, _) = get(app.clone(), "/files/notes.txt").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = Request::get("/files/notes.txt")
        .header("x-session", "1")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_colon_file_name_is_served() {
    let storage = setup_storage();
    fs::write(storage.path().join("a:b.txt"), b"colon").unwrap();

    let (status, content_type, body) = get(app(&storage, false), "/file-storage/a:b.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, b"colon");
}

#[tokio::test]
async fn test_head_returns_headers_without_body() {
    let storage = setup_storage();
    let response = app(&storage, false)
        .oneshot(
            Request::head("/file-storage/notes.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "5"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}
