//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    pub identity: IdentityConfig,
    pub engine: EngineConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which store driver backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(other.to_string()),
        }
    }
}

/// Store selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Bearer-token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub secret: String,
    #[serde(default = "default_identity_leeway")]
    pub leeway_secs: u64,
    /// User ids granted the admin role on every profile sync; when non-empty, everyone
    /// else is synced as a plain user
    #[serde(default)]
    pub admin_ids: Vec<String>,
}

/// How the per-user memo quota is enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemoQuotaMode {
    /// Count and append inside one partition transaction
    #[default]
    Atomic,
    /// Count with a query, then insert without a transaction. Concurrent posts by one
    /// user may overshoot the quota.
    BestEffort,
}

impl FromStr for MemoQuotaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            other => Err(other.to_string()),
        }
    }
}

/// Interaction engine tunables
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_sweep_interval_secs")]
    pub cache_sweep_interval_secs: u64,
    #[serde(default = "default_clap_ceiling")]
    pub clap_ceiling: i32,
    #[serde(default = "default_tx_max_attempts")]
    pub tx_max_attempts: u32,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub memo_quota_mode: MemoQuotaMode,
}

impl EngineConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_sweep_interval_secs: default_cache_sweep_interval_secs(),
            clap_ceiling: default_clap_ceiling(),
            tx_max_attempts: default_tx_max_attempts(),
            request_timeout_ms: default_request_timeout_ms(),
            memo_quota_mode: MemoQuotaMode::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "liveboard".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_identity_leeway() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_cache_sweep_interval_secs() -> u64 {
    60
}

fn default_clap_ceiling() -> i32 {
    99
}

fn default_tx_max_attempts() -> u32 {
    5
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let storage = StorageConfig {
            backend: vars.parse_or("STORAGE_BACKEND", StorageBackend::default)?,
        };

        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: vars
                    .parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars
                    .parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            }),
            None if storage.backend == StorageBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"));
            }
            None => None,
        };

        let config = Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.require("API_PORT")?,
            },
            storage,
            database,
            identity: IdentityConfig {
                secret: vars
                    .get("IDENTITY_SECRET")
                    .ok_or(ConfigError::MissingVar("IDENTITY_SECRET"))?,
                leeway_secs: vars.parse_or("IDENTITY_LEEWAY_SECS", default_identity_leeway)?,
                admin_ids: vars.list("ADMIN_LIST"),
            },
            engine: EngineConfig {
                cache_ttl_secs: vars.parse_or("ENGINE_CACHE_TTL_SECS", default_cache_ttl_secs)?,
                cache_sweep_interval_secs: vars.parse_or(
                    "ENGINE_CACHE_SWEEP_INTERVAL_SECS",
                    default_cache_sweep_interval_secs,
                )?,
                clap_ceiling: vars.parse_or("ENGINE_CLAP_CEILING", default_clap_ceiling)?,
                tx_max_attempts: vars
                    .parse_or("ENGINE_TX_MAX_ATTEMPTS", default_tx_max_attempts)?,
                request_timeout_ms: vars
                    .parse_or("ENGINE_REQUEST_TIMEOUT_MS", default_request_timeout_ms)?,
                memo_quota_mode: vars
                    .parse_or("ENGINE_MEMO_QUOTA_MODE", MemoQuotaMode::default)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS"),
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.parse_or("WORKER_ID", || 0)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.clap_ceiling < 1 {
            return Err(ConfigError::InvalidValue(
                "ENGINE_CLAP_CEILING",
                "must be at least 1".to_string(),
            ));
        }
        if self.engine.cache_sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "ENGINE_CACHE_SWEEP_INTERVAL_SECS",
                "must be at least 1".to_string(),
            ));
        }
        if self.engine.tx_max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "ENGINE_TX_MAX_ATTEMPTS",
                "must be at least 1".to_string(),
            ));
        }
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                "must be below 1024".to_string(),
            ));
        }
        Ok(())
    }
}

/// Typed access to a string variable source
struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Comma-separated values with blanks dropped
    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn require<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.get(key).ok_or(ConfigError::MissingVar(key))?;
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw))
    }

    fn parse_or<T: FromStr>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
