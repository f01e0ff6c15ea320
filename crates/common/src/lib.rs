//! Shared utilities, configuration, and error handling for Filmtrack
//!
//! This crate provides common functionality used across the Filmtrack workspace:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Database pool construction
//! - Request extractors and state machine errors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, StoreProvider};
pub use db::connect_pool;
pub use error::{Error, Result};
pub use extractors::{ValidatedJson, ValidatedPath, ValidatedQuery};
pub use state::StateError;
