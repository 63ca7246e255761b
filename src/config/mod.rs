mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, IdentityConfig, LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
};
