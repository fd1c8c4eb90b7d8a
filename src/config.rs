//! Configuration module
//!
//! Loads and validates configuration from environment variables. The result
//! is an immutable value built once at startup and passed to whatever needs
//! it; nothing reads the environment after that.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::store::StoreConfig;

/// Secret shipped in sample env files; refused in production
const PLACEHOLDER_JWT_SECRET: &str = "change_me";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue("APP_ENV")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

/// Supported JWT signing algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl FromStr for JwtAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            _ => Err(ConfigError::UnsupportedJwtAlgorithm(s.to_string())),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Environment (development, staging, production)
    pub app_env: Environment,

    /// HTTP port for the process surface
    pub app_port: u16,

    /// Remote store base URL
    pub db_base_url: String,

    /// Remote store timeout in seconds
    pub db_timeout_seconds: u64,

    /// JWT signing secret
    pub jwt_secret: String,

    pub jwt_algorithm: JwtAlgorithm,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// All variables are required. Validation stops at the first failure.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::MissingEnv(key));

        let app_env = require("APP_ENV")?;
        let app_port = require("APP_PORT")?;
        let db_base_url = require("DB_BASE_URL")?;
        let db_timeout_seconds = require("DB_TIMEOUT_SECONDS")?;
        let jwt_secret = require("JWT_SECRET")?;
        let jwt_algorithm = require("JWT_ALGORITHM")?;

        let app_env: Environment = app_env.parse()?;

        let app_port: u16 = app_port
            .parse()
            .map_err(|_| ConfigError::InvalidValue("APP_PORT"))?;
        if app_port == 0 {
            return Err(ConfigError::InvalidValue("APP_PORT"));
        }

        if !db_base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue("DB_BASE_URL"));
        }

        let db_timeout_seconds: u64 = db_timeout_seconds
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_TIMEOUT_SECONDS"))?;
        if db_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("DB_TIMEOUT_SECONDS"));
        }

        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET"));
        }

        let jwt_algorithm: JwtAlgorithm = jwt_algorithm.parse()?;

        if app_env == Environment::Production && jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(ConfigError::InsecureJwtSecret);
        }

        Ok(Self {
            app_env,
            app_port,
            db_base_url,
            db_timeout_seconds,
            jwt_secret,
            jwt_algorithm,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.app_env == Environment::Production
    }

    /// Settings for the remote store client
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.db_base_url.clone(),
            Duration::from_secs(self.db_timeout_seconds),
        )
    }
}

// Keep the secret out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("app_port", &self.app_port)
            .field("db_base_url", &self.db_base_url)
            .field("db_timeout_seconds", &self.db_timeout_seconds)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .finish()
    }
}

/// Load a `.env` file outside production. A missing file is not an error;
/// missing variables are reported later by `Config::from_env`.
pub fn load_dotenv() {
    let is_production = env::var("APP_ENV").map_or(false, |v| v == "production");
    if !is_production {
        dotenvy::dotenv().ok();
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedJwtAlgorithm(String),

    #[error("Insecure JWT secret in production")]
    InsecureJwtSecret,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("APP_ENV", "development".to_string()),
            ("APP_PORT", "8000".to_string()),
            ("DB_BASE_URL", "http://localhost:4000".to_string()),
            ("DB_TIMEOUT_SECONDS", "5".to_string()),
            ("JWT_SECRET", "supersecret".to_string()),
            ("JWT_ALGORITHM", "HS256".to_string()),
        ])
    }

    fn load(vars: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn load_with(key: &'static str, value: &str) -> Result<Config, ConfigError> {
        let mut vars = valid_env();
        vars.insert(key, value.to_string());
        load(&vars)
    }

    #[test]
    fn test_valid_configuration() {
        let config = load(&valid_env()).unwrap();
        assert_eq!(config.app_env, Environment::Development);
        assert_eq!(config.app_port, 8000);
        assert_eq!(config.jwt_algorithm, JwtAlgorithm::HS256);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_variable() {
        let result = load(&HashMap::new());
        assert_eq!(result.unwrap_err(), ConfigError::MissingEnv("APP_ENV"));

        let mut vars = valid_env();
        vars.remove("DB_BASE_URL");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::MissingEnv("DB_BASE_URL"));
    }

    #[test]
    fn test_invalid_environment() {
        assert_eq!(
            load_with("APP_ENV", "invalid").unwrap_err(),
            ConfigError::InvalidValue("APP_ENV")
        );
    }

    #[test]
    fn test_invalid_port() {
        for port in ["0", "-1", "http", "70000"] {
            assert_eq!(
                load_with("APP_PORT", port).unwrap_err(),
                ConfigError::InvalidValue("APP_PORT")
            );
        }
    }

    #[test]
    fn test_base_url_must_be_http() {
        assert_eq!(
            load_with("DB_BASE_URL", "localhost:4000").unwrap_err(),
            ConfigError::InvalidValue("DB_BASE_URL")
        );
        assert!(load_with("DB_BASE_URL", "https://db.internal").is_ok());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        for timeout in ["0", "-3", "soon"] {
            assert_eq!(
                load_with("DB_TIMEOUT_SECONDS", timeout).unwrap_err(),
                ConfigError::InvalidValue("DB_TIMEOUT_SECONDS")
            );
        }
    }

    #[test]
    fn test_empty_jwt_secret() {
        assert_eq!(
            load_with("JWT_SECRET", "").unwrap_err(),
            ConfigError::InvalidValue("JWT_SECRET")
        );
    }

    #[test]
    fn test_unsupported_jwt_algorithm() {
        assert_eq!(
            load_with("JWT_ALGORITHM", "RS256").unwrap_err(),
            ConfigError::UnsupportedJwtAlgorithm("RS256".to_string())
        );
    }

    #[test]
    fn test_insecure_production_secret() {
        let mut vars = valid_env();
        vars.insert("APP_ENV", "production".to_string());
        vars.insert("JWT_SECRET", "change_me".to_string());
        assert_eq!(load(&vars).unwrap_err(), ConfigError::InsecureJwtSecret);

        // The placeholder is tolerated outside production
        assert!(load_with("JWT_SECRET", "change_me").is_ok());
    }

    #[test]
    fn test_store_config() {
        let config = load(&valid_env()).unwrap();
        let store = config.store_config();
        assert_eq!(store.base_url, "http://localhost:4000");
        assert_eq!(store.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&valid_env()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("supersecret"));
    }
}
