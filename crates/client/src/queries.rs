//! Cached, retrying access to the Filmtrack API
//!
//! Reads go through the `QueryCache` and are retried with exponential backoff
//! while the API reports itself unavailable. A read only fills the cache if
//! no mutation invalidated its key while the request was in flight.
//! Mutations are sent exactly once and, only when they succeed, invalidate
//! the keys they made stale.

use std::future::Future;
use std::time::Duration;

use filmtrack_projects::{
    FilmProject, FilmProjectUpdate, Insight, NewFilmProject, ProjectId, ProjectPhase,
};

use crate::cache::{CachedValue, QueryCache, QueryKey};
use crate::http::ProjectClient;
use crate::{ClientConfig, Result};

/// Upper bound on a single backoff sleep
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct ProjectQueries {
    client: ProjectClient,
    cache: QueryCache,
    max_read_retries: u32,
    retry_base_delay: Duration,
}

impl ProjectQueries {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: ProjectClient::new(config)?,
            cache: QueryCache::new(config.cache_ttl),
            max_read_retries: config.max_read_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// The underlying uncached client
    pub fn client(&self) -> &ProjectClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(MAX_RETRY_DELAY)
    }

    async fn with_read_retry<T, F, Fut>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Err(e) if e.is_retryable() && attempt < self.max_read_retries => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Read failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn projects(&self) -> Result<Vec<FilmProject>> {
        if let Some(CachedValue::Projects(projects)) = self.cache.get(&QueryKey::Projects).await {
            return Ok(projects);
        }

        let generation = self.cache.generation(&QueryKey::Projects).await;
        let projects = self
            .with_read_retry("list_projects", || self.client.list_projects())
            .await?;
        self.cache
            .put_if_current(
                QueryKey::Projects,
                CachedValue::Projects(projects.clone()),
                generation,
            )
            .await;
        Ok(projects)
    }

    pub async fn project(&self, id: ProjectId) -> Result<Option<FilmProject>> {
        let key = QueryKey::Project(id);
        if let Some(CachedValue::Project(project)) = self.cache.get(&key).await {
            return Ok(project);
        }

        let generation = self.cache.generation(&key).await;
        let project = self
            .with_read_retry("get_project", || self.client.get_project(id))
            .await?;
        self.cache
            .put_if_current(key, CachedValue::Project(project.clone()), generation)
            .await;
        Ok(project)
    }

    pub async fn insights(&self, id: ProjectId) -> Result<Vec<Insight>> {
        let key = QueryKey::Insights(id);
        if let Some(CachedValue::Insights(insights)) = self.cache.get(&key).await {
            return Ok(insights);
        }

        let generation = self.cache.generation(&key).await;
        let insights = self
            .with_read_retry("list_insights", || self.client.list_insights(id))
            .await?;
        self.cache
            .put_if_current(key, CachedValue::Insights(insights.clone()), generation)
            .await;
        Ok(insights)
    }

    /// Project and insight log, filling both cache entries on a miss
    pub async fn project_with_insights(
        &self,
        id: ProjectId,
    ) -> Result<(FilmProject, Vec<Insight>)> {
        let cached_project = self.cache.get(&QueryKey::Project(id)).await;
        let cached_insights = self.cache.get(&QueryKey::Insights(id)).await;
        if let (
            Some(CachedValue::Project(Some(project))),
            Some(CachedValue::Insights(insights)),
        ) = (cached_project, cached_insights)
        {
            return Ok((project, insights));
        }

        let project_generation = self.cache.generation(&QueryKey::Project(id)).await;
        let insights_generation = self.cache.generation(&QueryKey::Insights(id)).await;
        let (project, insights) = self
            .with_read_retry("get_project_with_insights", || {
                self.client.get_project_with_insights(id)
            })
            .await?;
        self.cache
            .put_if_current(
                QueryKey::Project(id),
                CachedValue::Project(Some(project.clone())),
                project_generation,
            )
            .await;
        self.cache
            .put_if_current(
                QueryKey::Insights(id),
                CachedValue::Insights(insights.clone()),
                insights_generation,
            )
            .await;
        Ok((project, insights))
    }

    pub async fn max_project_id(&self) -> Result<i64> {
        self.with_read_retry("max_project_id", || self.client.max_project_id())
            .await
    }

    pub async fn titles_starting_with(&self, letter: &str) -> Result<Vec<String>> {
        self.with_read_retry("titles_starting_with", || {
            self.client.titles_starting_with(letter)
        })
        .await
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub async fn create_project(&self, project: &NewFilmProject) -> Result<ProjectId> {
        let id = self.client.create_project(project).await?;
        self.cache.invalidate(&QueryKey::after_create()).await;
        Ok(id)
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        update: &FilmProjectUpdate,
    ) -> Result<FilmProject> {
        let updated = self.client.update_project(id, update).await?;
        self.cache.invalidate(&QueryKey::after_project_write(id)).await;
        Ok(updated)
    }

    pub async fn advance_phase(&self, id: ProjectId, phase: ProjectPhase) -> Result<FilmProject> {
        let updated = self.client.advance_phase(id, phase).await?;
        self.cache.invalidate(&QueryKey::after_project_write(id)).await;
        Ok(updated)
    }

    pub async fn add_insight(&self, id: ProjectId, content: &str) -> Result<Insight> {
        let insight = self.client.add_insight(id, content).await?;
        self.cache.invalidate(&QueryKey::after_insight(id)).await;
        Ok(insight)
    }
}
