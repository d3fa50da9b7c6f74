pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment environment, selected once at startup via `APP_ENV`.
///
/// Anything other than `production` (case-insensitive) is treated as
/// development. The value is read once and passed down; nothing else in the
/// process consults `APP_ENV`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read an environment variable, falling back to a default
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a required environment variable
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_environment_matches_production_case_insensitively() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert!(Environment::from_env().is_production());
            });
        }
    }

    #[test]
    fn test_environment_unknown_value_is_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert!(Environment::from_env().is_development());
        });
    }

    #[test]
    fn test_env_or_default_prefers_set_value() {
        temp_env::with_var("SOME_KEY", Some("configured"), || {
            assert_eq!(env_or_default("SOME_KEY", "fallback"), "configured");
        });
        temp_env::with_var_unset("SOME_KEY", || {
            assert_eq!(env_or_default("SOME_KEY", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_reports_missing_key() {
        temp_env::with_var_unset("MUST_EXIST", || {
            let err = env_required("MUST_EXIST").unwrap_err();
            assert!(err.to_string().contains("MUST_EXIST"));
            assert!(err.to_string().contains("required"));
        });
    }
}
