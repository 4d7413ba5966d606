use thiserror::Error;

/// Failures that prevent the pipeline from starting or finishing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to open input file '{path}': {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read header row: {0}")]
    Header(#[source] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to spawn thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Thread '{0}' panicked")]
    ThreadPanicked(String),
}

impl From<crate::config::ConfigBuilderError> for EngineError {
    fn from(err: crate::config::ConfigBuilderError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Why a single record was skipped. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("line {line}: malformed record with {fields} field(s), expected at least 5")]
    MalformedRecord { line: u64, fields: usize },

    #[error("line {line}: invalid email format: {email}")]
    InvalidEmail { line: u64, email: String },

    #[error("line {line}: invalid domain: {domain}")]
    InvalidDomain { line: u64, domain: String },

    #[error("line {line}: read failed: {message}")]
    Read { line: u64, message: String },
}

impl RecordError {
    /// Line number of the offending record (0 when unknown).
    pub fn line(&self) -> u64 {
        match self {
            Self::MalformedRecord { line, .. }
            | Self::InvalidEmail { line, .. }
            | Self::InvalidDomain { line, .. }
            | Self::Read { line, .. } => *line,
        }
    }
}
