//! Server configuration from environment variables.
//!
//! Environment variables:
//!   DATABASE_URL        - full PostgreSQL URL; when unset the URL is built from
//!                         DB_HOST, DB_PORT, DB_USER_NAME, DB_USER_PASSWORD, DB_NAME
//!   HOST / PORT         - listen address (default: 0.0.0.0:3001); HOST may be
//!                         an IP literal or a resolvable host name
//!   ALLOWED_ORIGINS     - comma-separated CORS origins (default: http://localhost:3000)
//!   DB_MAX_CONNECTIONS  - pool size (default: 10)
//!   RUN_MIGRATIONS      - apply migrations at startup (default: true)
//!   LOG_FORMAT          - "json" or "text" (default: "text")
//!   LOG_FILE            - path to log file (optional, enables file logging)
//!   LOG_ANSI            - "true"/"false" override ANSI colors

use std::str::FromStr;

use kportal_core::{Error, Result};
use kportal_db::pool::{PoolConfig, DEFAULT_MAX_CONNECTIONS};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "kportal_api=debug,kportal_db=debug,tower_http=debug";

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `json` or `text`.
    pub format: String,
    pub file: Option<String>,
    /// `None` means auto-detect.
    pub ansi: Option<bool>,
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: String,
    pub pool: PoolConfig,
    pub run_migrations: bool,
    pub log: LogConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = get("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port: u16 = parse_or(get("DB_PORT"), "DB_PORT", 5432)?;
                let user = get("DB_USER_NAME").unwrap_or_else(|| "postgres".to_string());
                let password = lookup("DB_USER_PASSWORD").unwrap_or_default();
                let name = get("DB_NAME").unwrap_or_else(|| "kportal".to_string());
                build_database_url(&host, port, &user, &password, &name)
            }
        };

        let run_migrations = match get("RUN_MIGRATIONS") {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| {
                Error::Config(format!("RUN_MIGRATIONS must be true or false, got {v:?}"))
            })?,
        };

        let pool = PoolConfig::new(parse_or(
            get("DB_MAX_CONNECTIONS"),
            "DB_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?)?;

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            allowed_origins: get("ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            pool,
            run_migrations,
            log: LogConfig {
                format: get("LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
                file: get("LOG_FILE"),
                ansi: get("LOG_ANSI").map(|v| v == "true" || v == "1"),
            },
        })
    }

    /// Address to hand to `TcpListener::bind`; host names are resolved there.
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Credentials and database name are percent-encoded so reserved
/// characters (`@ / # : ?`) stay inside their URL component.
fn build_database_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
    let user = urlencoding::encode(user);
    let name = urlencoding::encode(name);
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        let password = urlencoding::encode(password);
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{key} must be a number, got {v:?}"))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
