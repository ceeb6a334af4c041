//! Process configuration, resolved once at startup and passed explicitly afterwards.

use crate::util::env;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Page size used when `MOVIE_LIMIT` is unset, unparseable or not positive.
pub const DEFAULT_MOVIE_LIMIT: i64 = 50;
pub const DEFAULT_PORT: u16 = 8089;

/// Location of the two datasets and the pool sizing for the storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub movie_db_path: PathBuf,
    pub ratings_db_path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated CORS origins; `None` allows any origin.
    pub allowed_origins: Option<String>,
    pub default_limit: i64,
    pub database: DatabaseConfig,
}

impl MovieConfig {
    /// Build the configuration from environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        env::init_env();

        let port = match env::env_opt("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: env::env_or("HOST", "0.0.0.0"),
            port,
            allowed_origins: env::env_opt("ALLOWED_ORIGINS"),
            default_limit: resolve_default_limit(env::env_opt("MOVIE_LIMIT").as_deref()),
            database: DatabaseConfig {
                movie_db_path: env::env_or("MOVIE_DB_PATH", "./movies.db").into(),
                ratings_db_path: env::env_or("RATINGS_DB_PATH", "./ratings.db").into(),
                max_connections: env::env_parse("DB_MAX_CONNS", 5u32).max(1),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Interpret a raw `MOVIE_LIMIT` value.
pub fn resolve_default_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_MOVIE_LIMIT)
}
