//! Settings loaded from the environment, with command-line overrides.
//!
//! ```bash
//! export CONCURRENCY=4
//! export READ_BUFFER_SIZE_IN_BYTES=65536
//! export INPUT_CSV_FILE_PATH=./customers.csv
//! ```
//!
//! ## Required Variables
//!
//! - `CONCURRENCY` - worker thread count, positive integer
//! - `READ_BUFFER_SIZE_IN_BYTES` - CSV reader buffer, positive integer
//! - `INPUT_CSV_FILE_PATH` - unless the path is passed as an argument
//!
//! ## Optional Variables
//!
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `RUST_LOG` - log filter (default: `info`)

use crate::args::Args;
use crate::error::ConfigError;
use crate::options::LogFormat;
use customer_importer_engine::config::{Config, ConfigBuilder};
use std::env;
use std::path::{Path, PathBuf};

pub const CONCURRENCY: &str = "CONCURRENCY";
pub const READ_BUFFER_SIZE: &str = "READ_BUFFER_SIZE_IN_BYTES";
pub const INPUT_PATH: &str = "INPUT_CSV_FILE_PATH";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_ENV_FILE: &str = ".env";

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_path: PathBuf,
    pub concurrency: usize,
    pub read_buffer_size: usize,
    pub log_format: LogFormat,
}

impl Settings {
    /// Resolve settings, letting any value given in `args` win over the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is absent from both sources or
    /// an environment value does not parse.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let concurrency = match args.concurrency {
            Some(value) => value,
            None => required_positive(CONCURRENCY)?,
        };
        let read_buffer_size = match args.read_buffer_size {
            Some(size) => size.0,
            None => required_positive(READ_BUFFER_SIZE)?,
        };
        let input_path = match &args.input {
            Some(path) => path.clone(),
            None => env::var_os(INPUT_PATH)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .ok_or(ConfigError::Missing(INPUT_PATH))?,
        };
        let log_format = match args.log_format {
            Some(format) => format,
            None => log_format_from_env()?,
        };

        Ok(Self {
            input_path,
            concurrency,
            read_buffer_size,
            log_format,
        })
    }

    /// Environment-only variant of [`Settings::load`].
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&Args::default())
    }

    /// Build the engine configuration.
    ///
    /// # Errors
    ///
    /// Returns the engine's validation error for out-of-range values.
    pub fn engine_config(&self) -> customer_importer_engine::error::Result<Config> {
        Ok(ConfigBuilder::default()
            .input_path(self.input_path.clone())
            .concurrency(self.concurrency)
            .read_buffer_size(self.read_buffer_size)
            .build()?)
    }
}

/// Load `KEY=value` pairs from an env file into the process environment.
///
/// Variables already set in the environment are left untouched. A missing
/// default `.env` is fine; a missing explicitly named file is not.
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if the file cannot be read or parsed.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(err) if explicit.is_none() && err.not_found() => Ok(None),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse a positive integer setting, naming the variable in any failure.
///
/// # Errors
///
/// Returns [`ConfigError::NotNumeric`] or [`ConfigError::NotPositive`].
pub fn parse_positive(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    let value: usize = raw.trim().parse().map_err(|_| ConfigError::NotNumeric {
        var,
        value: raw.to_string(),
    })?;
    if value == 0 {
        return Err(ConfigError::NotPositive { var });
    }
    Ok(value)
}

fn required_positive(var: &'static str) -> Result<usize, ConfigError> {
    let raw = env::var(var).map_err(|_| ConfigError::Missing(var))?;
    parse_positive(var, &raw)
}

fn log_format_from_env() -> Result<LogFormat, ConfigError> {
    match env::var(LOG_FORMAT) {
        Err(_) => Ok(LogFormat::default()),
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(value)),
        },
    }
}
