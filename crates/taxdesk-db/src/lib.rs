//! # Taxdesk DB
//!
//! PostgreSQL connection pool initialisation using SQLx.
//!
//! The database is optional: when no `DATABASE_URL` is configured the API
//! runs on in-memory repositories and this crate is never touched.
//!
//! # Example
//!
//! ```ignore
//! use taxdesk_db::init_db_pool;
//!
//! let pool = init_db_pool("postgres://localhost/taxdesk").await?;
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Connects to PostgreSQL and returns a pool.
///
/// The pool is cheaply cloneable and should live in the application state.
///
/// # Errors
///
/// Returns the underlying [`sqlx::Error`] when the database is unreachable
/// or the URL is malformed.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!(max_connections = MAX_CONNECTIONS, "Connected to PostgreSQL");

    Ok(pool)
}

pub use sqlx::PgPool;
