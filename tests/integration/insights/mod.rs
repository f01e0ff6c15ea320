//! Insight endpoint tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{nightfall_json, TestApp};

#[tokio::test]
async fn test_insights_append_in_call_order() {
    let app = TestApp::memory();
    let id = app.create(nightfall_json()).await;
    let uri = format!("/v1/projects/{}/insights", id);

    for n in 1..=5 {
        let (status, _) = app.post(&uri, json!({"content": format!("note {}", n)})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, insights) = app.get(&uri).await;
    let insights = insights.as_array().unwrap();
    assert_eq!(insights.len(), 5);
    for (n, insight) in insights.iter().enumerate() {
        assert_eq!(insight["content"], format!("note {}", n + 1));
    }
    assert!(insights
        .windows(2)
        .all(|w| w[0]["timestamp"].as_i64() <= w[1]["timestamp"].as_i64()));
}

#[tokio::test]
async fn test_insight_leaves_project_untouched() {
    let app = TestApp::memory();
    let id = app.create(nightfall_json()).await;
    let (_, before) = app.get(&format!("/v1/projects/{}", id)).await;

    app.post(
        &format!("/v1/projects/{}/insights", id),
        json!({"content": "Budget approved"}),
    )
    .await;

    let (_, after) = app.get(&format!("/v1/projects/{}", id)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_insights_of_unknown_project_are_empty() {
    let app = TestApp::memory();
    let (status, insights) = app.get("/v1/projects/77/insights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insights, json!([]));
}

#[tokio::test]
async fn test_oversized_insight_is_rejected() {
    let app = TestApp::memory();
    let id = app.create(nightfall_json()).await;

    let (status, _) = app
        .post(
            &format!("/v1/projects/{}/insights", id),
            json!({"content": "x".repeat(10_001)}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_with_insights_bundle() {
    let app = TestApp::memory();
    let id = app.create(nightfall_json()).await;
    app.post(
        &format!("/v1/projects/{}/insights", id),
        json!({"content": "Trailer tested well"}),
    )
    .await;

    let (status, body) = app.get(&format!("/v1/projects/{}/with-insights", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["id"], id);
    assert_eq!(body["insights"].as_array().unwrap().len(), 1);
}
