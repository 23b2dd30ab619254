//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, EngineConfig, Environment,
    IdentityConfig, MemoQuotaMode, RateLimitConfig, ServerConfig, SnowflakeConfig,
    StorageBackend, StorageConfig,
};
