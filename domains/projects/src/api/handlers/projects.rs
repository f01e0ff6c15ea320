//! Film project API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use filmtrack_common::{Error, Result, ValidatedJson, ValidatedPath, ValidatedQuery};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{
    AudienceType, BudgetLevel, DistributionConfidence, FilmProject, FilmProjectUpdate, Insight,
    MarketingBudgetLevel, NewFilmProject, PrimaryMarketingChannel, ProductionHealth, ProjectId,
    ReleaseModel, Scale, TalentStrategy, MAX_TEXT_FIELD_LENGTH,
};
use crate::domain::state::ProjectPhase;

/// Request for creating a film project
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub title: String,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub genre: String,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub language: String,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub theme: String,
    pub scale: Scale,
    pub budget_level: BudgetLevel,
    pub talent_strategy: TalentStrategy,
    #[validate(range(min = 1))]
    pub planned_shoot_days: i32,
    pub audience_type: AudienceType,
    pub marketing_budget_level: MarketingBudgetLevel,
    pub primary_marketing_channel: PrimaryMarketingChannel,
    pub release_model: ReleaseModel,
    pub distribution_confidence: DistributionConfidence,
}

impl From<CreateProjectRequest> for NewFilmProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            title: req.title,
            genre: req.genre,
            language: req.language,
            theme: req.theme,
            scale: req.scale,
            budget_level: req.budget_level,
            talent_strategy: req.talent_strategy,
            planned_shoot_days: req.planned_shoot_days,
            audience_type: req.audience_type,
            marketing_budget_level: req.marketing_budget_level,
            primary_marketing_channel: req.primary_marketing_channel,
            release_model: req.release_model,
            distribution_confidence: req.distribution_confidence,
        }
    }
}

/// Request for a full-record update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub title: String,
    pub phase: ProjectPhase,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub genre: String,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub language: String,
    #[validate(length(min = 1, max = MAX_TEXT_FIELD_LENGTH))]
    pub theme: String,
    pub scale: Scale,
    pub budget_level: BudgetLevel,
    pub talent_strategy: TalentStrategy,
    #[validate(range(min = 1))]
    pub planned_shoot_days: i32,
    #[validate(range(min = 0))]
    pub actual_shoot_days: Option<i32>,
    pub production_health: ProductionHealth,
    pub audience_type: AudienceType,
    pub marketing_budget_level: MarketingBudgetLevel,
    pub primary_marketing_channel: PrimaryMarketingChannel,
    pub release_model: ReleaseModel,
    pub distribution_confidence: DistributionConfidence,
}

impl From<UpdateProjectRequest> for FilmProjectUpdate {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            title: req.title,
            phase: req.phase,
            genre: req.genre,
            language: req.language,
            theme: req.theme,
            scale: req.scale,
            budget_level: req.budget_level,
            talent_strategy: req.talent_strategy,
            planned_shoot_days: req.planned_shoot_days,
            actual_shoot_days: req.actual_shoot_days,
            production_health: req.production_health,
            audience_type: req.audience_type,
            marketing_budget_level: req.marketing_budget_level,
            primary_marketing_channel: req.primary_marketing_channel,
            release_model: req.release_model,
            distribution_confidence: req.distribution_confidence,
        }
    }
}

/// Request for moving a project to another phase
#[derive(Debug, Deserialize, Validate)]
pub struct AdvancePhaseRequest {
    pub phase: ProjectPhase,
}

/// Query params for the title prefix lookup
#[derive(Debug, Deserialize, Validate)]
pub struct TitlesQuery {
    #[validate(length(equal = 1))]
    pub letter: String,
}

/// Project response DTO: the record plus its phase display name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: FilmProject,
    pub phase_name: &'static str,
}

impl From<FilmProject> for ProjectResponse {
    fn from(project: FilmProject) -> Self {
        Self {
            phase_name: project.current_phase.name(),
            project,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedProjectResponse {
    pub id: ProjectId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxProjectIdResponse {
    pub max_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ProjectWithInsightsResponse {
    pub project: ProjectResponse,
    pub insights: Vec<Insight>,
}

/// Create a new film project
pub async fn create_project(
    State(state): State<ProjectsState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<CreatedProjectResponse>)> {
    let id = state.store.create_project(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedProjectResponse { id })))
}

/// List every film project
pub async fn list_projects(
    State(state): State<ProjectsState>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let projects = state.store.list_projects().await?;
    tracing::debug!(count = projects.len(), "Listed film projects");

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Get a single film project by ID
pub async fn get_project(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
) -> Result<Json<ProjectResponse>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Project {} not found", id)))?;

    Ok(Json(project.into()))
}

/// Overwrite every mutable field of a film project
pub async fn update_project(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let updated = state.store.update_project(id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// Move a film project to a later phase
pub async fn advance_phase(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
    ValidatedJson(req): ValidatedJson<AdvancePhaseRequest>,
) -> Result<Json<ProjectResponse>> {
    let updated = state.store.advance_phase(id, req.phase).await?;
    Ok(Json(updated.into()))
}

/// Highest project id issued so far
pub async fn get_max_project_id(
    State(state): State<ProjectsState>,
) -> Result<Json<MaxProjectIdResponse>> {
    let max_id = state.store.max_project_id().await?;
    Ok(Json(MaxProjectIdResponse { max_id }))
}

/// Titles starting with a given letter
pub async fn list_titles(
    State(state): State<ProjectsState>,
    ValidatedQuery(query): ValidatedQuery<TitlesQuery>,
) -> Result<Json<Vec<String>>> {
    let titles = state.store.titles_starting_with(&query.letter).await?;
    Ok(Json(titles))
}

/// Get a film project together with its insight log
pub async fn get_project_with_insights(
    State(state): State<ProjectsState>,
    ValidatedPath(id): ValidatedPath<ProjectId>,
) -> Result<Json<ProjectWithInsightsResponse>> {
    let (project, insights) = state.store.get_project_with_insights(id).await?;
    Ok(Json(ProjectWithInsightsResponse {
        project: project.into(),
        insights,
    }))
}
