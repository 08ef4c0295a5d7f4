//! Process configuration sourced from environment variables.
//!
//! Secrets (token signing key, login password) have no defaults: serving
//! without them configured is a startup error, never a silent fallback.

use anyhow::{bail, Context};

/// Effective server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`LIBRARIUM_HTTP_PORT`, default 4000).
    pub http_port: u16,
    /// MongoDB connection string (`MONGODB_URI`). When unset the server
    /// runs against the in-memory store, seeded with the demo catalog.
    pub mongodb_uri: Option<String>,
    /// Database name within MongoDB (`LIBRARIUM_DB_NAME`, default "library").
    pub db_name: String,
    /// Symmetric signing secret for bearer tokens (`LIBRARIUM_JWT_SECRET`, required).
    pub token_secret: String,
    /// Shared login password checked at login (`LIBRARIUM_LOGIN_PASSWORD`, required).
    pub login_password: String,
    /// Token lifetime in minutes (`LIBRARIUM_TOKEN_TTL_MIN`, default 60).
    pub token_ttl_min: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let http_port = match std::env::var("LIBRARIUM_HTTP_PORT") {
            Ok(v) => v.parse::<u16>().with_context(|| format!("Invalid LIBRARIUM_HTTP_PORT: {}", v))?,
            Err(_) => 4000,
        };
        let mongodb_uri = std::env::var("MONGODB_URI").ok().filter(|s| !s.is_empty());
        let db_name = std::env::var("LIBRARIUM_DB_NAME").unwrap_or_else(|_| "library".to_string());
        let Ok(token_secret) = std::env::var("LIBRARIUM_JWT_SECRET") else {
            bail!("LIBRARIUM_JWT_SECRET is not set; refusing to start without a signing secret");
        };
        if token_secret.is_empty() {
            bail!("LIBRARIUM_JWT_SECRET is empty; refusing to start without a signing secret");
        }
        let Ok(login_password) = std::env::var("LIBRARIUM_LOGIN_PASSWORD") else {
            bail!("LIBRARIUM_LOGIN_PASSWORD is not set; refusing to start without a login credential");
        };
        let token_ttl_min = match std::env::var("LIBRARIUM_TOKEN_TTL_MIN") {
            Ok(v) => {
                let n = v.parse::<i64>().with_context(|| format!("Invalid LIBRARIUM_TOKEN_TTL_MIN: {}", v))?;
                if n <= 0 { bail!("LIBRARIUM_TOKEN_TTL_MIN must be positive, got {}", n); }
                n
            }
            Err(_) => 60,
        };
        Ok(Config { http_port, mongodb_uri, db_name, token_secret, login_password, token_ttl_min })
    }
}
