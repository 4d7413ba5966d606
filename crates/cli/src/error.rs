// crates/cli/src/error.rs
use customer_importer_engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be a number, got '{value}'")]
    NotNumeric { var: &'static str, value: String },

    #[error("{var} must be greater than 0")]
    NotPositive { var: &'static str },

    #[error("LOG_FORMAT must be 'text' or 'json', got '{0}'")]
    InvalidLogFormat(String),

    #[error("Failed to load env file '{path}': {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    /// Startup failures the engine has already logged before returning them.
    pub fn already_reported(&self) -> bool {
        matches!(
            self,
            Self::Engine(EngineError::Open { .. } | EngineError::Header(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_engine_open_failure_is_already_reported() {
        let err = AppError::from(EngineError::Open {
            path: PathBuf::from("absent.csv"),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        assert!(err.already_reported());
    }

    #[test]
    fn test_other_failures_still_need_logging() {
        assert!(!AppError::from(EngineError::Config("concurrency".into())).already_reported());
        assert!(!AppError::from(ConfigError::Missing("CONCURRENCY")).already_reported());
        assert!(!AppError::Logging("set twice".into()).already_reported());
    }
}
