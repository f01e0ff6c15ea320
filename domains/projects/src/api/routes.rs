//! Route definitions for Projects domain API

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{insights, projects};
use super::middleware::ProjectsState;

/// Create project routes
fn project_routes() -> Router<ProjectsState> {
    Router::new()
        .route(
            "/v1/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/v1/projects/max-id", get(projects::get_max_project_id))
        .route("/v1/projects/titles", get(projects::list_titles))
        .route(
            "/v1/projects/{id}",
            get(projects::get_project).put(projects::update_project),
        )
        .route("/v1/projects/{id}/phase", put(projects::advance_phase))
        .route(
            "/v1/projects/{id}/with-insights",
            get(projects::get_project_with_insights),
        )
}

/// Create insight routes
fn insight_routes() -> Router<ProjectsState> {
    Router::new().route(
        "/v1/projects/{id}/insights",
        get(insights::list_insights).post(insights::add_insight),
    )
}

/// Create all Projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new()
        .merge(project_routes())
        .merge(insight_routes())
}
