//! Insight log API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use filmtrack_common::{Result, ValidatedJson, ValidatedPath};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Insight, ProjectId, MAX_INSIGHT_LENGTH};

/// Request for appending an insight
#[derive(Debug, Deserialize, Validate)]
pub struct AddInsightRequest {
    #[validate(length(min = 1, max = MAX_INSIGHT_LENGTH))]
    pub content: String,
}

/// Append an insight to a project's log
pub async fn add_insight(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
    ValidatedJson(req): ValidatedJson<AddInsightRequest>,
) -> Result<(StatusCode, Json<Insight>)> {
    let insight = state.store.add_insight(id, req.content).await?;
    Ok((StatusCode::CREATED, Json(insight)))
}

/// List a project's insights in append order
pub async fn list_insights(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
) -> Result<Json<Vec<Insight>>> {
    let insights = state.store.list_insights(id).await?;
    Ok(Json(insights))
}
