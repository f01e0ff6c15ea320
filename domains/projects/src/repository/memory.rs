//! In-memory project store
//!
//! Used for local development (`STORE_PROVIDER=memory`) and tests. A single
//! `RwLock` guards all state, so every write is serialized and the last one wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use filmtrack_common::Result;
use tokio::sync::RwLock;

use super::{project_not_found, ProjectStore};
use crate::domain::entities::{
    title_prefix, FilmProject, FilmProjectUpdate, Insight, NewFilmProject, ProjectId,
};
use crate::domain::state::ProjectPhase;

#[derive(Debug, Default)]
struct StoreState {
    last_id: i64,
    projects: BTreeMap<ProjectId, FilmProject>,
    insights: HashMap<ProjectId, Vec<Insight>>,
}

/// Project store held entirely in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create_project(&self, project: NewFilmProject) -> Result<ProjectId> {
        let mut state = self.state.write().await;
        let id = ProjectId(state.last_id + 1);
        let record = FilmProject::new(id, project)?;
        state.last_id = id.0;

        tracing::info!(project_id = %id, title = %record.title, "Film project created");
        state.projects.insert(id, record);
        Ok(id)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<FilmProject>> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<FilmProject>> {
        Ok(self.state.read().await.projects.values().cloned().collect())
    }

    async fn max_project_id(&self) -> Result<i64> {
        Ok(self.state.read().await.last_id)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        update: FilmProjectUpdate,
    ) -> Result<FilmProject> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&id)
            .ok_or_else(|| project_not_found(id))?;

        // Apply to a copy so a rejected update leaves the stored record untouched
        let mut updated = project.clone();
        updated.apply_update(update)?;
        *project = updated.clone();

        tracing::info!(project_id = %id, phase = %updated.current_phase, "Film project updated");
        Ok(updated)
    }

    async fn advance_phase(&self, id: ProjectId, phase: ProjectPhase) -> Result<FilmProject> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .get_mut(&id)
            .ok_or_else(|| project_not_found(id))?;

        let from = project.current_phase;
        project.advance_phase(phase)?;

        tracing::info!(project_id = %id, %from, to = %phase, "Film project phase advanced");
        Ok(project.clone())
    }

    async fn add_insight(&self, id: ProjectId, content: String) -> Result<Insight> {
        let mut state = self.state.write().await;
        if !state.projects.contains_key(&id) {
            return Err(project_not_found(id));
        }

        let log = state.insights.entry(id).or_default();
        let insight = Insight::append_after(content, log.last())?;
        log.push(insight.clone());

        tracing::debug!(project_id = %id, entries = log.len(), "Insight appended");
        Ok(insight)
    }

    async fn list_insights(&self, id: ProjectId) -> Result<Vec<Insight>> {
        Ok(self
            .state
            .read()
            .await
            .insights
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn titles_starting_with(&self, letter: &str) -> Result<Vec<String>> {
        let prefix = title_prefix(letter)?;
        Ok(self
            .state
            .read()
            .await
            .projects
            .values()
            .filter(|p| p.title.starts_with(prefix))
            .map(|p| p.title.clone())
            .collect())
    }
}
