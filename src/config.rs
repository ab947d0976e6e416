/*
 * Responsibility
 * - Load environment configuration (listen address, credential strategy,
 *   parameter names).
 * - Validate at startup; a missing or malformed value fails the boot.
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which credential strategy serves this deployment. Selected once at
/// startup, never per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialConfig {
    Static {
        username: String,
        password: String,
    },
    Ssm {
        username_param: String,
        password_param: String,
        cache_ttl_seconds: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Local stand-in for the hosting environment's invocation timeout.
    pub invocation_timeout_seconds: u64,
    pub credentials: CredentialConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let invocation_timeout_seconds = std::env::var("INVOCATION_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let credentials = credential_config_from_env()?;

        Ok(Self {
            addr,
            app_env,
            invocation_timeout_seconds,
            credentials,
        })
    }
}

fn credential_config_from_env() -> Result<CredentialConfig, ConfigError> {
    let source = std::env::var("CREDENTIAL_SOURCE").unwrap_or_else(|_| "static".to_string());

    match source.to_ascii_lowercase().as_str() {
        "static" => {
            let username =
                std::env::var("AUTH_USERNAME").map_err(|_| ConfigError::Missing("AUTH_USERNAME"))?;
            let password =
                std::env::var("AUTH_PASSWORD").map_err(|_| ConfigError::Missing("AUTH_PASSWORD"))?;

            Ok(CredentialConfig::Static { username, password })
        }
        "ssm" => {
            let username_param = std::env::var("AUTH_USERNAME_PARAM")
                .unwrap_or_else(|_| "/edge-auth/username".to_string());
            let password_param = std::env::var("AUTH_PASSWORD_PARAM")
                .unwrap_or_else(|_| "/edge-auth/password".to_string());

            // 0 disables the provider-level cache; every invocation then
            // consults the store.
            let cache_ttl_seconds = std::env::var("CREDENTIAL_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);

            Ok(CredentialConfig::Ssm {
                username_param,
                password_param,
                cache_ttl_seconds,
            })
        }
        _ => Err(ConfigError::Invalid("CREDENTIAL_SOURCE")),
    }
}
