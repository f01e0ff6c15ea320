//! Projects domain state

use crate::repository::ProjectStore;
use std::sync::Arc;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub store: Arc<dyn ProjectStore>,
}

impl ProjectsState {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }
}
