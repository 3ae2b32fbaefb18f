//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BreakerConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig, SnowflakeConfig, ValidationConfig,
};
