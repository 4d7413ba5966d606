// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::options::{LogFormat, OutputFormat};
use crate::parsers::{SizeArg, parse_positive_usize};

/// Top-level CLI arguments parsed via clap.
///
/// Every flag is optional; unset values fall back to the environment
/// (and the `.env` file).
#[derive(Parser, Debug, Default)]
#[command(
    name = "customer_importer",
    version = crate::VERSION,
    about = "Count customers per email domain in a CSV export"
)]
pub struct Args {
    /// Customer CSV file (overrides INPUT_CSV_FILE_PATH)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Number of worker threads (overrides CONCURRENCY)
    #[arg(short = 'j', long, value_parser = parse_positive_usize, help_heading = "Processing")]
    pub concurrency: Option<usize>,

    /// CSV read buffer size, e.g. 4096 or 64K (overrides READ_BUFFER_SIZE_IN_BYTES)
    #[arg(long, help_heading = "Processing")]
    pub read_buffer_size: Option<SizeArg>,

    /// Report format
    #[arg(long, value_enum, default_value = "log", help_heading = "Output")]
    pub format: OutputFormat,

    /// Log line format (overrides LOG_FORMAT)
    #[arg(long, value_enum, help_heading = "Output")]
    pub log_format: Option<LogFormat>,

    /// Environment file loaded before reading settings
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub env_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "customer_importer",
            "customers.csv",
            "-j",
            "8",
            "--read-buffer-size",
            "64K",
            "--format",
            "json",
            "--log-format",
            "json",
            "--env-file",
            "prod.env",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("customers.csv")));
        assert_eq!(args.concurrency, Some(8));
        assert_eq!(args.read_buffer_size, Some(SizeArg(64 * 1024)));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert_eq!(args.env_file, Some(PathBuf::from("prod.env")));
    }

    #[test]
    fn test_defaults_leave_settings_to_env() {
        let args = Args::try_parse_from(["customer_importer"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.concurrency.is_none());
        assert!(args.read_buffer_size.is_none());
        assert_eq!(args.format, OutputFormat::Log);
        assert!(args.log_format.is_none());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Args::try_parse_from(["customer_importer", "-j", "0"]).is_err());
        assert!(Args::try_parse_from(["customer_importer", "--read-buffer-size", "0"]).is_err());
    }
}
