//! Redirect page tests.

use std::{io::Write, sync::Arc};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use webhook_relay::{create_router, AppState};
use webhook_relay_core::RecordingPublisher;

const PAGE: &str = "<!doctype html><html><head><meta http-equiv=\"refresh\" content=\"0; url=viber://pa?chatURI=shop\"></head><body></body></html>";

fn page_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp page");
    file.write_all(PAGE.as_bytes()).expect("write temp page");
    file
}

/// The page is served verbatim with an HTML content type.
#[tokio::test]
async fn serves_static_page() {
    let file = page_file();
    let publisher = Arc::new(RecordingPublisher::new());
    let app = create_router(AppState::new(publisher.clone(), "q", file.path()));

    let request = Request::builder()
        .method("GET")
        .uri("/redirect")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, PAGE.as_bytes());
    assert!(publisher.is_empty());
}

/// Method and body are ignored; nothing is published.
#[tokio::test]
async fn ignores_method_and_body() {
    let file = page_file();
    let publisher = Arc::new(RecordingPublisher::new());
    let app = create_router(AppState::new(publisher.clone(), "q", file.path()));

    let request = Request::builder()
        .method("POST")
        .uri("/redirect")
        .body(Body::from(r#"{"would":"be relayed"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, PAGE.as_bytes());
    assert!(publisher.is_empty());
}

/// A missing page is a 404, not a crash.
#[tokio::test]
async fn missing_page_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("redirect.html");
    let app = create_router(AppState::new(
        Arc::new(RecordingPublisher::new()),
        "q",
        missing,
    ));

    let request = Request::builder()
        .uri("/redirect")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Router still serves the relay afterwards
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
