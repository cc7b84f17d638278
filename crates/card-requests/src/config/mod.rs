use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::card_requests::evaluation::DEFAULT_CURRENCY_SYMBOL;
use crate::workflows::card_requests::LifecycleConfig;

pub const DEFAULT_CONTAINER: &str = "card-requests";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub currency: CurrencyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let container = env::var("CARD_REQUESTS_CONTAINER")
            .unwrap_or_else(|_| DEFAULT_CONTAINER.to_string());
        let symbol = env::var("CARD_CURRENCY_SYMBOL")
            .unwrap_or_else(|_| DEFAULT_CURRENCY_SYMBOL.to_string());

        let store = StoreConfig::new(container)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            store,
            currency: CurrencyConfig { symbol },
        })
    }

    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            container: self.store.container.clone(),
            currency_symbol: self.currency.symbol.clone(),
        }
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Container backing the card request store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub container: String,
}

impl StoreConfig {
    pub fn new(container: impl Into<String>) -> Result<Self, ConfigError> {
        let container = container.into().trim().to_string();
        if container.is_empty() {
            return Err(ConfigError::EmptyContainer);
        }
        Ok(Self { container })
    }
}

/// Currency rendering for credit limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyConfig {
    pub symbol: String,
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyContainer,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyContainer => {
                write!(f, "CARD_REQUESTS_CONTAINER must name a store container")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyContainer => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "CARD_REQUESTS_CONTAINER",
            "CARD_CURRENCY_SYMBOL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.store.container, DEFAULT_CONTAINER);
        assert_eq!(config.currency.symbol, "R$");
    }

    #[test]
    fn lifecycle_settings_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CARD_REQUESTS_CONTAINER", "cards-requests-prod");
        env::set_var("CARD_CURRENCY_SYMBOL", "$");
        env::set_var("APP_LOG_FORMAT", "JSON");
        let config = AppConfig::load().expect("config loads");
        let lifecycle = config.lifecycle();
        assert_eq!(lifecycle.container, "cards-requests-prod");
        assert_eq!(lifecycle.currency_symbol, "$");
        assert_eq!(config.telemetry.format, LogFormat::Json);
        reset_env();
    }

    #[test]
    fn blank_container_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CARD_REQUESTS_CONTAINER", "   ");
        let err = AppConfig::load().expect_err("blank container fails");
        assert!(matches!(err, ConfigError::EmptyContainer));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
