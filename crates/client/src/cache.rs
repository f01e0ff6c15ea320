//! Client-side query cache
//!
//! Holds the last successful response per query key for at most `ttl`. The
//! cache is never authoritative: mutations invalidate the keys they affect
//! and the next read refetches them.
//!
//! Every key carries a generation that `invalidate` bumps. A read notes the
//! generation before fetching and stores its result only if the key was not
//! invalidated meanwhile, so a response fetched before a mutation can never
//! repopulate a key that mutation made stale.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use filmtrack_projects::{FilmProject, Insight, ProjectId};
use tokio::sync::RwLock;

/// Cached query identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Projects,
    Project(ProjectId),
    Insights(ProjectId),
}

impl QueryKey {
    /// Keys made stale by a successful project creation
    pub fn after_create() -> Vec<QueryKey> {
        vec![QueryKey::Projects]
    }

    /// Keys made stale by an update or a phase change
    pub fn after_project_write(id: ProjectId) -> Vec<QueryKey> {
        vec![QueryKey::Project(id), QueryKey::Projects]
    }

    /// Keys made stale by an appended insight
    pub fn after_insight(id: ProjectId) -> Vec<QueryKey> {
        vec![QueryKey::Project(id), QueryKey::Insights(id)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Projects(Vec<FilmProject>),
    Project(Option<FilmProject>),
    Insights(Vec<Insight>),
}

/// Invalidation counter observed before a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug)]
struct Entry {
    value: CachedValue,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    generations: HashMap<QueryKey, u64>,
}

impl CacheState {
    fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl QueryCache {
    /// Cache whose entries are served for at most `ttl`; a zero ttl disables reuse
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Fresh value for `key`, if any
    pub async fn get(&self, key: &QueryKey) -> Option<CachedValue> {
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Current generation of `key`, to be passed back to `put_if_current`
    pub async fn generation(&self, key: &QueryKey) -> Generation {
        Generation(self.state.read().await.generation(key))
    }

    /// Store `value` unless `key` was invalidated after `observed` was taken.
    /// Returns whether the value was stored.
    pub async fn put_if_current(
        &self,
        key: QueryKey,
        value: CachedValue,
        observed: Generation,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation(&key) != observed.0 {
            tracing::trace!(?key, "Discarding response fetched before invalidation");
            return false;
        }
        state.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
        true
    }

    pub async fn invalidate(&self, keys: &[QueryKey]) {
        let mut state = self.state.write().await;
        for key in keys {
            *state.generations.entry(*key).or_insert(0) += 1;
            if state.entries.remove(key).is_some() {
                tracing::trace!(?key, "Cache entry invalidated");
            }
        }
    }

    /// Whether a fresh entry exists for `key`
    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.get(key).await.is_some()
    }

    pub async fn clear(&self) {
        self.state.write().await.entries.clear();
    }
}
