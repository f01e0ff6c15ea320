//! Project Store: the single owner of film project state
//!
//! Every implementation honours the same contract:
//! - reads of unknown ids return `None` (or an empty log), never an error
//! - writes to unknown ids fail with `Error::NotFound`
//! - concurrent writes to one record are serialized, last write wins

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use filmtrack_common::{Config, Error, Result, StoreProvider};

use crate::domain::entities::{FilmProject, FilmProjectUpdate, Insight, NewFilmProject, ProjectId};
use crate::domain::state::ProjectPhase;

pub use memory::InMemoryProjectStore;
pub use postgres::PgProjectStore;

pub(crate) fn project_not_found(id: ProjectId) -> Error {
    Error::NotFound(format!("Project {} not found", id))
}

/// Operations exposed by the Project Store
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// Validate and store a new project in phase 1, returning its fresh id
    async fn create_project(&self, project: NewFilmProject) -> Result<ProjectId>;

    /// Fetch one project
    async fn get_project(&self, id: ProjectId) -> Result<Option<FilmProject>>;

    /// Fetch every project, ordered by id
    async fn list_projects(&self) -> Result<Vec<FilmProject>>;

    /// Highest id issued so far, 0 when no project exists
    async fn max_project_id(&self) -> Result<i64>;

    /// Overwrite every mutable field of a project
    async fn update_project(&self, id: ProjectId, update: FilmProjectUpdate)
        -> Result<FilmProject>;

    /// Change only the current phase of a project
    async fn advance_phase(&self, id: ProjectId, phase: ProjectPhase) -> Result<FilmProject>;

    /// Append a note to a project's insight log
    async fn add_insight(&self, id: ProjectId, content: String) -> Result<Insight>;

    /// Insight log in append order
    async fn list_insights(&self, id: ProjectId) -> Result<Vec<Insight>>;

    /// Titles starting with the given single character, ordered by project id
    async fn titles_starting_with(&self, letter: &str) -> Result<Vec<String>>;

    /// A project together with its insight log; unknown ids are an error here
    async fn get_project_with_insights(
        &self,
        id: ProjectId,
    ) -> Result<(FilmProject, Vec<Insight>)> {
        let project = self
            .get_project(id)
            .await?
            .ok_or_else(|| project_not_found(id))?;
        let insights = self.list_insights(id).await?;
        Ok((project, insights))
    }
}

/// Factory for creating ProjectStore implementations.
pub struct ProjectStoreFactory;

impl ProjectStoreFactory {
    /// Create a ProjectStore based on configuration.
    pub async fn create(config: &Config) -> Result<Arc<dyn ProjectStore>> {
        match config.store_provider {
            StoreProvider::Postgres => {
                tracing::info!("Creating PostgreSQL project store");
                let database_url = config.database_url.as_deref().ok_or_else(|| {
                    Error::Internal("DATABASE_URL is required for the postgres store".to_string())
                })?;
                let pool =
                    filmtrack_common::connect_pool(database_url, config.database_max_connections)
                        .await?;
                let store = PgProjectStore::new(pool);
                store.migrate().await?;
                Ok(Arc::new(store))
            }
            StoreProvider::Memory => {
                tracing::info!("Creating in-memory project store");
                Ok(Arc::new(InMemoryProjectStore::new()))
            }
        }
    }
}
