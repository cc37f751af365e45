//! Connection pool for the read-only API.
//!
//! Requests only issue short reads, so the pool is sized by a single knob and
//! acquisition fails fast: a request, or the `/health/db` check, waits at most
//! [`ACQUIRE_TIMEOUT`] for a free connection before reporting a store error.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use kportal_core::{Error, Result};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing; always holds at least one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: ACQUIRE_TIMEOUT,
        }
    }
}

impl PoolConfig {
    /// Pool of `max_connections`; zero is a configuration error.
    pub fn new(max_connections: u32) -> Result<Self> {
        if max_connections == 0 {
            return Err(Error::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_connections,
            ..Self::default()
        })
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Open the pool and establish the first connection.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
        .map_err(|e| {
            warn!(
                subsystem = "database",
                component = "pool",
                op = "connect",
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "Could not connect to database"
            );
            Error::Database(e)
        })?;

    info!(
        subsystem = "database",
        component = "pool",
        op = "connect",
        max_connections = config.max_connections,
        duration_ms = start.elapsed().as_millis() as u64,
        "Database pool ready"
    );
    Ok(pool)
}

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub size: u32,
    pub idle: usize,
}

impl PoolUsage {
    pub fn of(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle(),
        }
    }

    /// Every open connection is checked out.
    pub fn saturated(&self) -> bool {
        self.size > 0 && self.idle == 0
    }
}

/// Log pool occupancy; warns when no idle connection is left.
pub fn log_pool_usage(pool: &PgPool) {
    let usage = PoolUsage::of(pool);
    if usage.saturated() {
        warn!(
            subsystem = "database",
            component = "pool",
            pool_size = usage.size,
            "Connection pool has no idle connections"
        );
    } else {
        debug!(
            subsystem = "database",
            component = "pool",
            pool_size = usage.size,
            pool_idle = usage.idle,
            "Pool usage"
        );
    }
}
