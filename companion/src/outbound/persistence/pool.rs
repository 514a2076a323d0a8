//! Async connection pool for the on-device SQLite database.
//!
//! SQLite has no native async driver, so connections are
//! `SyncConnectionWrapper<SqliteConnection>` from `diesel-async`, which runs
//! each query on the blocking thread pool. `bb8` manages checkout and
//! validation. Embedded migrations run once when the pool is built.

use std::time::Duration;

use diesel::{Connection, SqliteConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Async-capable SQLite connection used by every persistence adapter.
pub(crate) type SqliteAsyncConnection = SyncConnectionWrapper<SqliteConnection>;

define_port_error! {
    /// Errors raised while building the pool or checking out connections.
    pub enum PoolError {
        /// Failed to check out a connection from the pool.
        Checkout { message: String } => "failed to get connection from pool: {message}",
        /// Failed to build the connection pool.
        Build { message: String } => "failed to build connection pool: {message}",
        /// Embedded migrations could not be applied.
        Migration { message: String } => "failed to apply migrations: {message}",
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```ignore
/// let config = PoolConfig::new("/var/lib/companion/local.sqlite3")
///     .with_max_size(2)
///     .with_connection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for the SQLite file at `database_url`.
    ///
    /// Defaults: `max_size` 4, `min_idle` 1, `connection_timeout` 30 seconds.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 4,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections; zero is treated as one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Pool of SQLite connections shared by the persistence adapters.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteAsyncConnection>,
}

impl DbPool {
    /// Apply pending migrations, then build the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Migration`] when the database file cannot be
    /// opened or migrated, and [`PoolError::Build`] when the pool cannot be
    /// constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let applied = run_migrations(config.database_url.clone()).await?;
        info!(
            database = %config.database_url,
            applied,
            "sqlite migrations applied"
        );

        let manager =
            AsyncDieselConnectionManager::<SqliteAsyncConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection becomes available
    /// within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteAsyncConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

async fn run_migrations(database_url: String) -> Result<usize, PoolError> {
    tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_url)
            .map_err(|err| PoolError::migration(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.len())
            .map_err(|err| PoolError::migration(err.to_string()))
    })
    .await
    .map_err(|err| PoolError::migration(err.to_string()))?
}
