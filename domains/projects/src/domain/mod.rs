//! Projects domain model: entities and the phase lifecycle

pub mod entities;
pub mod state;
