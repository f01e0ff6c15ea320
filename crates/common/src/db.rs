//! Shared database setup for Filmtrack
//!
//! Domain repositories receive a ready `PgPool`; this module owns how it is built.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::Result;

/// How long a request waits for a free connection before the store is reported unavailable
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect a PostgreSQL pool with the workspace defaults
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Database pool connected");
    Ok(pool)
}
