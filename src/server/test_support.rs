//! Helpers for driving the router in tests

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::{AppState, build_router};
use crate::client::MockZammadClient;
use crate::service::ZammadService;

pub fn state(mock: MockZammadClient) -> AppState {
    AppState::new(ZammadService::new(Arc::new(mock)))
}

pub fn router(mock: MockZammadClient) -> Router {
    build_router(state(mock), &[])
}

/// Router plus a handle on the mock for call assertions.
pub fn router_with_handle(mock: MockZammadClient) -> (Router, Arc<MockZammadClient>) {
    let mock = Arc::new(mock);
    let state = AppState::new(ZammadService::new(mock.clone()));
    (build_router(state, &[]), mock)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_text(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(router, request).await;
    (status, body)
}

pub async fn get_with_headers(router: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

pub async fn post_raw(
    router: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, "application/json", body.to_string()).await
}
