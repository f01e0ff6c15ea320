//! Projects domain: film projects, phase lifecycle, insights

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    AudienceType, BudgetLevel, DistributionConfidence, FilmProject, FilmProjectUpdate, Insight,
    MarketingBudgetLevel, NewFilmProject, PrimaryMarketingChannel, ProductionHealth, ProjectId,
    ReleaseModel, Scale, TalentStrategy,
};
pub use domain::state::{PhaseLifecycle, ProjectPhase, StateError};

// Re-export repository types
pub use repository::{InMemoryProjectStore, PgProjectStore, ProjectStore, ProjectStoreFactory};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
