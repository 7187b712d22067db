//! HTTP serving of a rendered schema page.
#![cfg(feature = "serve")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use schema_viz::generate_page;
use schema_viz::graph::{reduce, VizGraph};
use schema_viz::schema::load_graph;
use schema_viz::serve::PageServer;
use std::path::{Path, PathBuf};
use tower::ServiceExt;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/schema")
}

async fn fetch(server: &PageServer, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_serves_rendered_fixture_page() {
    let graph = load_graph(&fixture_dir(), None).unwrap();
    let server = PageServer::from_schema(&graph).unwrap();

    let (status, content_type, body) = fetch(&server, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body, generate_page(&fixture_dir(), None).unwrap());
}

#[tokio::test]
async fn test_serves_fixture_graph() {
    let graph = load_graph(&fixture_dir(), None).unwrap();
    let server = PageServer::from_schema(&graph).unwrap();

    let (status, _, body) = fetch(&server, "/graph.json").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: VizGraph = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, reduce(&graph));
}
