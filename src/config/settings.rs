//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_DATA_DIR, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_DB_USER,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};
use crate::domain::lenient;

/// Storage backend for the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sql,
    Json,
}

impl Backend {
    /// Parse a backend name, falling back to SQL for anything unknown.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Backend::Json,
            _ => Backend::Sql,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub api_use_db: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("backend", &self.backend)
            .field("data_dir", &self.data_dir)
            .field("api_use_db", &self.api_use_db)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            postgres_url(
                &lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                lookup("DB_PORT")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_DB_PORT),
                &lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
                &lookup("DB_PASSWORD").unwrap_or_default(),
                &lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            )
        });

        Self {
            database_url,
            backend: lookup("CRM_BACKEND")
                .map(|v| Backend::parse(&v))
                .unwrap_or(Backend::Sql),
            data_dir: lookup("CRM_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            api_use_db: lookup("API_USE_DB")
                .and_then(|v| lenient::bool_from_text(&v))
                .unwrap_or(false),
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Credentials are percent-encoded so `@`, `:` and `/` survive in the URL.
fn postgres_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
    let user = urlencoding::encode(user);
    if password.is_empty() {
        format!("postgres://{}@{}:{}/{}", user, host, port, name)
    } else {
        let password = urlencoding::encode(password);
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}
