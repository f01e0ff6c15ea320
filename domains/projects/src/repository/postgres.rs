//! PostgreSQL project store
//!
//! Mutations lock the project row (`FOR UPDATE`) for the duration of the
//! transaction, apply the change through the domain entity, then write the
//! whole record back. Concurrent writers therefore serialize per project and
//! the last one to commit wins.

use filmtrack_common::Result;
use sqlx::{PgPool, Postgres, Transaction};

use super::{project_not_found, ProjectStore};
use crate::domain::entities::{
    title_prefix, FilmProject, FilmProjectUpdate, Insight, NewFilmProject, ProjectId,
};
use crate::domain::state::ProjectPhase;

/// Column list shared by every `film_projects` query
pub const PROJECT_COLUMNS: &str = "id, title, genre, language, theme, current_phase, \
    scale, budget_level, talent_strategy, planned_shoot_days, actual_shoot_days, \
    production_health, audience_type, marketing_budget_level, primary_marketing_channel, \
    release_model, distribution_confidence, last_updated";

const INSIGHT_COLUMNS: &str = "content, created_at AS timestamp";

#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations
    #[mutants::skip] // Needs a live database
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| filmtrack_common::Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn lock_project_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: ProjectId,
    ) -> Result<FilmProject> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM film_projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, FilmProject>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| project_not_found(id))
    }

    async fn write_project_tx(
        tx: &mut Transaction<'_, Postgres>,
        project: &FilmProject,
    ) -> Result<FilmProject> {
        let query = format!(
            "UPDATE film_projects SET \
                title = $2, genre = $3, language = $4, theme = $5, current_phase = $6, \
                scale = $7, budget_level = $8, talent_strategy = $9, \
                planned_shoot_days = $10, actual_shoot_days = $11, production_health = $12, \
                audience_type = $13, marketing_budget_level = $14, \
                primary_marketing_channel = $15, release_model = $16, \
                distribution_confidence = $17, last_updated = $18 \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, FilmProject>(&query)
            .bind(project.id)
            .bind(&project.title)
            .bind(&project.genre)
            .bind(&project.language)
            .bind(&project.theme)
            .bind(project.current_phase)
            .bind(project.scale)
            .bind(project.budget_level)
            .bind(project.talent_strategy)
            .bind(project.planned_shoot_days)
            .bind(project.actual_shoot_days)
            .bind(project.production_health)
            .bind(project.audience_type)
            .bind(project.marketing_budget_level)
            .bind(project.primary_marketing_channel)
            .bind(project.release_model)
            .bind(project.distribution_confidence)
            .bind(project.last_updated)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }
}

#[async_trait::async_trait]
impl ProjectStore for PgProjectStore {
    async fn create_project(&self, project: NewFilmProject) -> Result<ProjectId> {
        project.validate()?;

        let id = sqlx::query_scalar::<_, ProjectId>(
            r#"
            INSERT INTO film_projects (
                title, genre, language, theme, current_phase,
                scale, budget_level, talent_strategy, planned_shoot_days,
                audience_type, marketing_budget_level, primary_marketing_channel,
                release_model, distribution_confidence
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&project.title)
        .bind(&project.genre)
        .bind(&project.language)
        .bind(&project.theme)
        .bind(ProjectPhase::INITIAL)
        .bind(project.scale)
        .bind(project.budget_level)
        .bind(project.talent_strategy)
        .bind(project.planned_shoot_days)
        .bind(project.audience_type)
        .bind(project.marketing_budget_level)
        .bind(project.primary_marketing_channel)
        .bind(project.release_model)
        .bind(project.distribution_confidence)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(project_id = %id, title = %project.title, "Film project created");
        Ok(id)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<FilmProject>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM film_projects WHERE id = $1");
        let project = sqlx::query_as::<_, FilmProject>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<FilmProject>> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM film_projects ORDER BY id ASC");
        let projects = sqlx::query_as::<_, FilmProject>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn max_project_id(&self) -> Result<i64> {
        let max = sqlx::query_scalar::<_, i64>("SELECT COALESCE(MAX(id), 0) FROM film_projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(max)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        update: FilmProjectUpdate,
    ) -> Result<FilmProject> {
        let mut tx = self.pool.begin().await?;
        let mut project = Self::lock_project_tx(&mut tx, id).await?;
        project.apply_update(update)?;
        let updated = Self::write_project_tx(&mut tx, &project).await?;
        tx.commit().await?;

        tracing::info!(project_id = %id, phase = %updated.current_phase, "Film project updated");
        Ok(updated)
    }

    async fn advance_phase(&self, id: ProjectId, phase: ProjectPhase) -> Result<FilmProject> {
        let mut tx = self.pool.begin().await?;
        let mut project = Self::lock_project_tx(&mut tx, id).await?;
        let from = project.current_phase;
        project.advance_phase(phase)?;
        let updated = Self::write_project_tx(&mut tx, &project).await?;
        tx.commit().await?;

        tracing::info!(project_id = %id, %from, to = %phase, "Film project phase advanced");
        Ok(updated)
    }

    async fn add_insight(&self, id: ProjectId, content: String) -> Result<Insight> {
        let mut tx = self.pool.begin().await?;
        // The row lock serializes appends so timestamps stay ordered within a log
        Self::lock_project_tx(&mut tx, id).await?;

        let latest_query = format!(
            "SELECT {INSIGHT_COLUMNS} FROM project_insights \
             WHERE project_id = $1 ORDER BY sequence DESC LIMIT 1"
        );
        let latest = sqlx::query_as::<_, Insight>(&latest_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let insight = Insight::append_after(content, latest.as_ref())?;

        let insert_query = format!(
            "INSERT INTO project_insights (project_id, content, created_at) \
             VALUES ($1, $2, $3) RETURNING {INSIGHT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Insight>(&insert_query)
            .bind(id)
            .bind(&insight.content)
            .bind(insight.timestamp)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(project_id = %id, "Insight appended");
        Ok(created)
    }

    async fn list_insights(&self, id: ProjectId) -> Result<Vec<Insight>> {
        let query = format!(
            "SELECT {INSIGHT_COLUMNS} FROM project_insights \
             WHERE project_id = $1 ORDER BY sequence ASC"
        );
        let insights = sqlx::query_as::<_, Insight>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(insights)
    }

    async fn titles_starting_with(&self, letter: &str) -> Result<Vec<String>> {
        let prefix = title_prefix(letter)?;
        let titles = sqlx::query_scalar::<_, String>(
            "SELECT title FROM film_projects WHERE left(title, 1) = $1 ORDER BY id ASC",
        )
        .bind(prefix.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(titles)
    }
}
