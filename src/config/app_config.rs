use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::identity::DEFAULT_IDENTITY_ENDPOINT;
use crate::infrastructure::key_cache::DEFAULT_KEY_CACHE_CAPACITY;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub identity: IdentityConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Port for the public listener
    pub external_port: u16,
    /// Port for the private listener, which also exposes /metrics
    pub internal_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub colors: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of validated credentials kept in memory
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            external_port: 9000,
            internal_port: 9001,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            colors: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_KEY_CACHE_CAPACITY,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IDENTITY_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl IdentityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from optional files and `AUTH__*` environment variables
    ///
    /// Sources, lowest precedence first: `config/default`, `config/local`,
    /// the explicit `path` if given, then the environment.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    /// `AUTH__<SECTION>__<KEY>`, e.g. `AUTH__CACHE__SIZE=5000`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("AUTH")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        path: Option<&str>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder.add_source(env).build()?.try_deserialize()
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cache.size == 0 {
            return Err(DomainError::configuration(
                "cache.size must be greater than zero",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(DomainError::configuration(format!(
                "Unknown logging.level '{}'",
                self.logging.level
            )));
        }

        self.server
            .host
            .parse::<IpAddr>()
            .map_err(|e| DomainError::configuration(format!("Invalid server.host: {}", e)))?;

        if self.server.external_port == self.server.internal_port {
            return Err(DomainError::configuration(
                "server.external_port and server.internal_port must differ",
            ));
        }

        reqwest::Url::parse(&self.identity.endpoint).map_err(|e| {
            DomainError::configuration(format!("Invalid identity.endpoint: {}", e))
        })?;

        if self.identity.timeout_secs == 0 {
            return Err(DomainError::configuration(
                "identity.timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Address for the public listener
    pub fn external_listen_addr(&self) -> Result<SocketAddr, DomainError> {
        self.listen_addr(self.server.external_port)
    }

    /// Address for the private listener
    pub fn internal_listen_addr(&self) -> Result<SocketAddr, DomainError> {
        self.listen_addr(self.server.internal_port)
    }

    fn listen_addr(&self, port: u16) -> Result<SocketAddr, DomainError> {
        let ip = self
            .server
            .host
            .parse::<IpAddr>()
            .map_err(|e| DomainError::configuration(format!("Invalid server.host: {}", e)))?;

        Ok(SocketAddr::from((ip, port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.external_port, 9000);
        assert_eq!(config.server.internal_port, 9001);
        assert_eq!(config.cache.size, 10_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.colors);
        assert_eq!(config.identity.endpoint, DEFAULT_IDENTITY_ENDPOINT);
        assert_eq!(config.identity.timeout(), Duration::from_secs(10));
        assert!(config.metrics.enabled);
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [cache]
            size = 500

            [logging]
            format = "json"
            "#,
        );

        assert_eq!(config.cache.size, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.external_port, 9000);
    }

    #[test]
    fn test_zero_cache_size_rejected() {
        let config = from_toml("[cache]\nsize = 0\n");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache.size"));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = from_toml("[logging]\nlevel = \"loud\"\n");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = from_toml("[identity]\nendpoint = \"not a url\"\n");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_ports_rejected() {
        let config = from_toml("[server]\nexternal_port = 9000\ninternal_port = 9000\n");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_addrs() {
        let config = from_toml("[server]\nhost = \"127.0.0.1\"\nexternal_port = 8000\n");

        assert_eq!(
            config.external_listen_addr().unwrap().to_string(),
            "127.0.0.1:8000"
        );
        assert_eq!(
            config.internal_listen_addr().unwrap().to_string(),
            "127.0.0.1:9001"
        );
    }

    #[test]
    fn test_invalid_host() {
        let config = from_toml("[server]\nhost = \"localhost:80\"\n");

        assert!(config.external_listen_addr().is_err());
        assert!(config.validate().is_err());
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();

        AppConfig::environment().source(Some(vars))
    }

    #[test]
    fn test_load_applies_environment_overrides() {
        let config = AppConfig::load_with_env(
            None,
            env(&[
                ("AUTH__CACHE__SIZE", "5000"),
                ("AUTH__SERVER__EXTERNAL_PORT", "9100"),
                ("AUTH__LOGGING__FORMAT", "json"),
                ("UNRELATED__CACHE__SIZE", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.cache.size, 5000);
        assert_eq!(config.server.external_port, 9100);
        assert_eq!(config.server.internal_port, 9001);
        assert_eq!(config.logging.format, LogFormat::Json);
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_load_explicit_file_with_environment_on_top() {
        let path = std::env::temp_dir().join(format!("auth-store-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[cache]\nsize = 250\n\n[identity]\nendpoint = \"http://localhost:5000\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = AppConfig::load_with_env(
            path.to_str(),
            env(&[("AUTH__IDENTITY__TIMEOUT_SECS", "7")]),
        );
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.cache.size, 250);
        assert_eq!(config.identity.endpoint, "http://localhost:5000");
        assert_eq!(config.identity.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load_with_env(Some("does/not/exist.toml"), env(&[]));

        assert!(result.is_err());
    }
}
