//! # kportal-db
//!
//! PostgreSQL database layer for the K-portal API.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for members, member tags and news
//! - Schema migrations
//!
//! Every query only sees rows that are not soft-deleted
//! (`deleted_flag = FALSE AND deleted_at IS NULL`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use kportal_db::{Database, NewsListFilter, NewsRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/kportal", PoolConfig::default()).await?;
//!
//!     let page = db.news.list(&NewsListFilter::default()).await?;
//!     println!("Fetched {} news items", page.len());
//!     Ok(())
//! }
//! ```
use async_trait::async_trait;
use tracing::debug;

pub mod members;
pub mod news;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can reuse them
pub mod test_fixtures;

// Re-export core types
pub use kportal_core::*;

// Re-export repository implementations
pub use members::PgMemberRepository;
pub use news::PgNewsRepository;
pub use pool::{connect_pool, log_pool_usage, PoolConfig, PoolUsage};

/// SQL predicate selecting rows that are not soft-deleted.
///
/// Takes the table alias used in the surrounding query.
pub(crate) fn visible(alias: &str) -> String {
    format!("{alias}.deleted_flag = FALSE AND {alias}.deleted_at IS NULL")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Member and member tag repository.
    pub members: PgMemberRepository,
    /// News repository.
    pub news: PgNewsRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            members: PgMemberRepository::new(pool.clone()),
            news: PgNewsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the given URL with the given pool sizing.
    pub async fn connect(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = connect_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

#[async_trait]
impl StoreHealth for Database {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        log_pool_usage(&self.pool);
        debug!(subsystem = "database", op = "ping", "Database ping succeeded");
        Ok(())
    }
}
