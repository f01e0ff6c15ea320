//! API endpoint integration tests
//!
//! Drives the composed application router against the in-memory store.

#![allow(dead_code)]

mod common;
mod insights;
mod invariants;
mod projects;

use common::TestApp;

#[test_log::test(tokio::test)]
async fn test_health_check() {
    let app = TestApp::memory();
    let (status, _) = app.get("/health").await;
    assert_eq!(status, axum::http::StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn test_store_invariants_in_memory() {
    invariants::run_all(|| async { TestApp::memory() }).await;
}
