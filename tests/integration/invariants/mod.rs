//! Store invariants shared by every `ProjectStore` implementation
//!
//! Each check receives a fresh app from the factory closure so the memory and
//! PostgreSQL runs exercise identical assertions.

use std::future::Future;

use filmtrack_common::Error;
use filmtrack_projects::{ProjectId, ProjectPhase};

use crate::common::{nightfall, TestApp};

pub async fn run_all<F, Fut>(fresh: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = TestApp>,
{
    ids_start_at_one(&fresh().await).await;
    unknown_reads_are_empty(&fresh().await).await;
    writes_to_unknown_ids_fail(&fresh().await).await;
    phase_never_decreases(&fresh().await).await;
    invalid_create_consumes_no_id(&fresh().await).await;
    titles_are_case_sensitive(&fresh().await).await;
}

async fn ids_start_at_one(app: &TestApp) {
    assert_eq!(app.store.max_project_id().await.unwrap(), 0);
    let id = app.store.create_project(nightfall()).await.unwrap();
    assert_eq!(id, ProjectId(1));
    assert_eq!(app.store.max_project_id().await.unwrap(), 1);
}

async fn unknown_reads_are_empty(app: &TestApp) {
    assert!(app.store.get_project(ProjectId(404)).await.unwrap().is_none());
    assert!(app.store.list_insights(ProjectId(404)).await.unwrap().is_empty());
    assert!(app.store.list_projects().await.unwrap().is_empty());
}

async fn writes_to_unknown_ids_fail(app: &TestApp) {
    let advance = app
        .store
        .advance_phase(ProjectId(404), ProjectPhase::Packaging)
        .await;
    assert!(matches!(advance, Err(Error::NotFound(_))));

    let insight = app
        .store
        .add_insight(ProjectId(404), "orphan".to_string())
        .await;
    assert!(matches!(insight, Err(Error::NotFound(_))));
}

async fn phase_never_decreases(app: &TestApp) {
    let id = app.store.create_project(nightfall()).await.unwrap();
    for phase in ProjectPhase::ALL {
        let project = app.store.advance_phase(id, phase).await.unwrap();
        assert_eq!(project.current_phase, phase);
    }

    let back = app
        .store
        .advance_phase(id, ProjectPhase::ScriptSelection)
        .await;
    assert!(matches!(back, Err(Error::Validation(_))));
}

async fn invalid_create_consumes_no_id(app: &TestApp) {
    let mut invalid = nightfall();
    invalid.planned_shoot_days = 0;
    let created = app.store.create_project(invalid).await;
    assert!(matches!(created, Err(Error::Validation(_))));
    assert_eq!(app.store.max_project_id().await.unwrap(), 0);
}

async fn titles_are_case_sensitive(app: &TestApp) {
    let mut lower = nightfall();
    lower.title = "noir".to_string();
    app.store.create_project(nightfall()).await.unwrap();
    app.store.create_project(lower).await.unwrap();

    assert_eq!(
        app.store.titles_starting_with("N").await.unwrap(),
        vec!["Nightfall".to_string()]
    );
    assert_eq!(
        app.store.titles_starting_with("n").await.unwrap(),
        vec!["noir".to_string()]
    );
    assert!(matches!(
        app.store.titles_starting_with("").await,
        Err(Error::Validation(_))
    ));
}
