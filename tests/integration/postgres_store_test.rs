//! Store invariants against PostgreSQL
//!
//! Requires a reachable database (`TEST_DATABASE_URL`); run with
//! `cargo test -p filmtrack-integration-tests -- --ignored`.

#![allow(dead_code)]

mod common;
mod invariants;

use common::TestApp;
use filmtrack_projects::ProjectPhase;

async fn postgres_app() -> TestApp {
    TestApp::postgres()
        .await
        .expect("PostgreSQL test database must be reachable")
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_store_invariants_postgres() {
    invariants::run_all(postgres_app).await;
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_store_rejects_backward_phase_move() {
    let app = postgres_app().await;
    let id = app.store.create_project(common::nightfall()).await.unwrap();
    app.store
        .advance_phase(id, ProjectPhase::Distribution)
        .await
        .unwrap();

    let result = app.store.advance_phase(id, ProjectPhase::Packaging).await;
    assert!(result.is_err());

    let stored = app.store.get_project(id).await.unwrap().unwrap();
    assert_eq!(stored.current_phase, ProjectPhase::Distribution);
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_insights_keep_order() {
    let app = postgres_app().await;
    let id = app.store.create_project(common::nightfall()).await.unwrap();

    let mut handles = Vec::new();
    for n in 0..10 {
        let store = app.store.clone();
        handles.push(tokio::spawn(async move {
            store.add_insight(id, format!("note {}", n)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let insights = app.store.list_insights(id).await.unwrap();
    assert_eq!(insights.len(), 10);
    assert!(insights.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}
