use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the final report reaches the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One log line per domain (stderr), nothing on stdout
    #[default]
    Log,
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
