//! Project endpoint tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{nightfall_json, titled_json, update_json, TestApp};

mod test_create_and_read {
    use super::*;

    #[tokio::test]
    async fn test_nightfall_listed_once() {
        let app = TestApp::memory();
        app.create(nightfall_json()).await;
        app.create(titled_json("Dawn")).await;

        let (status, projects) = app.get("/v1/projects").await;
        assert_eq!(status, StatusCode::OK);

        let matches: Vec<_> = projects
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["title"] == "Nightfall")
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["plannedShootDays"], 20);
        assert_eq!(matches[0]["currentPhase"], 1);
    }

    #[tokio::test]
    async fn test_created_record_matches_input() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;

        let (_, project) = app.get(&format!("/v1/projects/{}", id)).await;
        for (field, value) in nightfall_json().as_object().unwrap() {
            assert_eq!(&project[field], value, "field {} differs", field);
        }
        assert_eq!(project["productionHealth"], "good");
        assert_eq!(project["phaseName"], "Script Selection & Concept Evaluation");
    }

    #[tokio::test]
    async fn test_ids_are_fresh_and_max_id_follows() {
        let app = TestApp::memory();
        let (_, empty) = app.get("/v1/projects/max-id").await;
        assert_eq!(empty["maxId"], 0);

        let first = app.create(nightfall_json()).await;
        let second = app.create(titled_json("Dawn")).await;
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let (_, max) = app.get("/v1/projects/max-id").await;
        assert_eq!(max["maxId"], 2);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let app = TestApp::memory();
        let mut body = nightfall_json();
        body.as_object_mut().unwrap().remove("genre");

        let (status, error) = app.post("/v1/projects", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let app = TestApp::memory();
        let (status, error) = app.get("/v1/projects/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }
}

mod test_phases {
    use super::*;

    #[tokio::test]
    async fn test_advance_straight_to_post_release() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;

        let (status, project) = app
            .put(&format!("/v1/projects/{}/phase", id), json!({"phase": 8}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(project["currentPhase"], 8);
        assert_eq!(
            project["phaseName"],
            "Post-Release Optimization & Monetization"
        );
    }

    #[tokio::test]
    async fn test_advance_changes_only_phase() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let (_, before) = app.get(&format!("/v1/projects/{}", id)).await;

        let (_, after) = app
            .put(&format!("/v1/projects/{}/phase", id), json!({"phase": 5}))
            .await;

        for (field, value) in before.as_object().unwrap() {
            if ["currentPhase", "phaseName", "lastUpdated"].contains(&field.as_str()) {
                continue;
            }
            assert_eq!(&after[field], value, "field {} changed", field);
        }
        assert!(after["lastUpdated"].as_i64() >= before["lastUpdated"].as_i64());
    }

    #[tokio::test]
    async fn test_phase_bounds() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let uri = format!("/v1/projects/{}/phase", id);

        let (zero, _) = app.put(&uri, json!({"phase": 0})).await;
        let (nine, _) = app.put(&uri, json!({"phase": 9})).await;
        assert_eq!(zero, StatusCode::BAD_REQUEST);
        assert_eq!(nine, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_cannot_move_backwards() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let uri = format!("/v1/projects/{}", id);
        app.put(&format!("{}/phase", uri), json!({"phase": 4})).await;

        let (_, project) = app.get(&uri).await;
        let (status, _) = app.put(&uri, update_json(&project, 2)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, unchanged) = app.get(&uri).await;
        assert_eq!(unchanged, project);
    }
}

mod test_updates {
    use super::*;

    #[tokio::test]
    async fn test_update_is_idempotent_apart_from_timestamp() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let uri = format!("/v1/projects/{}", id);
        let (_, project) = app.get(&uri).await;

        let mut body = update_json(&project, 3);
        body["actualShootDays"] = json!(22);
        body["productionHealth"] = json!("critical");

        let (_, mut first) = app.put(&uri, body.clone()).await;
        let (_, mut second) = app.put(&uri, body).await;
        first.as_object_mut().unwrap().remove("lastUpdated");
        second.as_object_mut().unwrap().remove("lastUpdated");
        assert_eq!(first, second);
        assert_eq!(second["actualShootDays"], 22);
    }

    #[tokio::test]
    async fn test_actual_days_before_production_rejected() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let uri = format!("/v1/projects/{}", id);
        let (_, project) = app.get(&uri).await;

        let mut body = update_json(&project, 2);
        body["actualShootDays"] = json!(5);
        let (status, error) = app.put(&uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_retitles_and_changes_lookup() {
        let app = TestApp::memory();
        let id = app.create(nightfall_json()).await;
        let uri = format!("/v1/projects/{}", id);
        let (_, project) = app.get(&uri).await;

        let mut body = update_json(&project, 1);
        body["title"] = json!("Daybreak");
        let (status, _) = app.put(&uri, body).await;
        assert_eq!(status, StatusCode::OK);

        let (_, n_titles) = app.get("/v1/projects/titles?letter=N").await;
        let (_, d_titles) = app.get("/v1/projects/titles?letter=D").await;
        assert_eq!(n_titles, json!([]));
        assert_eq!(d_titles, json!(["Daybreak"]));
    }
}
