//! Configuration types for swapi-ingest

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Source API settings (endpoint and fan-out width)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root; `people/` and `people/{id}` are resolved against it
    /// (default: "https://swapi.dev/api/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of people fetched concurrently and persisted per batch (default: 10)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Store a placeholder record instead of aborting when a person returns 404
    ///
    /// SWAPI has no person 17, so a full run against the public API only
    /// completes with this enabled. Set through `SWAPI_PLACEHOLDER_ON_NOT_FOUND`.
    #[serde(default)]
    pub placeholder_on_not_found: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chunk_size: default_chunk_size(),
            placeholder_on_not_found: false,
        }
    }
}

/// Connection parameters for the relational store
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database user (required unless `url` is set)
    #[serde(default)]
    pub user: Option<String>,

    /// Database password
    #[serde(default)]
    pub password: Option<String>,

    /// Database name (default: "asyncio_db")
    #[serde(default = "default_db_name")]
    pub name: String,

    /// Database host (default: "127.0.0.1")
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Database port (default: 5432)
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Full connection URL; overrides the individual fields when set
    /// (e.g. `sqlite:///tmp/swapi.db` for local runs)
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pool size (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            name: default_db_name(),
            host: default_db_host(),
            port: default_db_port(),
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL for the pool
    ///
    /// Returns `url` verbatim when set, otherwise a PostgreSQL URL assembled from
    /// the individual fields with percent-encoded credentials.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let user = self
            .user
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::config("database user is not set", ENV_PG_USER))?;

        let credentials = match self.password.as_deref() {
            Some(password) => format!(
                "{}:{}",
                urlencoding::encode(user),
                urlencoding::encode(password)
            ),
            None => urlencoding::encode(user).into_owned(),
        };

        Ok(format!(
            "postgres://{}@{}:{}/{}",
            credentials, self.host, self.port, self.name
        ))
    }
}

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Storage settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Environment variable names read by [`Config::from_env`]
pub const ENV_PG_USER: &str = "PG_USER";
/// Database password
pub const ENV_PG_PASSWORD: &str = "PG_PASSWORD";
/// Database name
pub const ENV_PG_DB: &str = "PG_DB";
/// Database host
pub const ENV_PG_HOST: &str = "PG_HOST";
/// Database port
pub const ENV_PG_PORT: &str = "PG_PORT";
/// Full connection URL override
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// API root override
pub const ENV_BASE_URL: &str = "SWAPI_BASE_URL";
/// Chunk size override
pub const ENV_CHUNK_SIZE: &str = "SWAPI_CHUNK_SIZE";
/// Store placeholders for people that return 404 (`true`/`false`, `1`/`0`, `yes`/`no`)
pub const ENV_PLACEHOLDER_ON_NOT_FOUND: &str = "SWAPI_PLACEHOLDER_ON_NOT_FOUND";

impl Config {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to defaults. Values that fail to parse are errors
    /// naming the key, never silently replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.api.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_CHUNK_SIZE) {
            config.api.chunk_size = raw.trim().parse().map_err(|_| {
                Error::config(format!("invalid chunk size '{}'", raw), ENV_CHUNK_SIZE)
            })?;
        }
        if let Some(raw) = lookup(ENV_PLACEHOLDER_ON_NOT_FOUND) {
            config.api.placeholder_on_not_found =
                parse_flag(&raw).ok_or_else(|| {
                    Error::config(
                        format!("invalid boolean '{}'", raw),
                        ENV_PLACEHOLDER_ON_NOT_FOUND,
                    )
                })?;
        }

        config.database.user = lookup(ENV_PG_USER);
        config.database.password = lookup(ENV_PG_PASSWORD);
        if let Some(name) = lookup(ENV_PG_DB) {
            config.database.name = name;
        }
        if let Some(host) = lookup(ENV_PG_HOST) {
            config.database.host = host;
        }
        if let Some(raw) = lookup(ENV_PG_PORT) {
            config.database.port = raw
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("invalid port '{}'", raw), ENV_PG_PORT))?;
        }
        config.database.url = lookup(ENV_DATABASE_URL).filter(|u| !u.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise fail deep inside a run
    pub fn validate(&self) -> Result<()> {
        if self.api.chunk_size == 0 {
            return Err(Error::config(
                "chunk size must be greater than zero",
                ENV_CHUNK_SIZE,
            ));
        }

        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            Error::config(
                format!("invalid base URL '{}': {}", self.api.base_url, e),
                ENV_BASE_URL,
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::config(
                format!("base URL '{}' cannot be used as a base", self.api.base_url),
                ENV_BASE_URL,
            ));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config {
                message: "max_connections must be greater than zero".to_string(),
                key: Some("max_connections".to_string()),
            });
        }

        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn default_base_url() -> String {
    "https://swapi.dev/api/".to_string()
}

fn default_chunk_size() -> usize {
    10
}

fn default_db_name() -> String {
    "asyncio_db".to_string()
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    5
}
