// crates/engine/src/lib.rs
pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod logger;
pub mod model;
pub mod pipeline;
pub mod pool;
pub mod report;
pub mod source;
pub mod stats;

use crate::config::Config;
use crate::error::Result;
use crate::logger::Logger;
use crate::pipeline::Pipeline;
use crate::stats::RunResult;

/// Run the import pipeline over `config.input_path`.
///
/// Returns the sorted per-domain report together with a run summary. Every
/// sorted entry is also handed to `logger` at info level, in order.
///
/// # Errors
///
/// Returns an error only when the pipeline cannot start (bad configuration,
/// unreadable input or header) or a pipeline thread fails. Per-record problems
/// are logged as warnings and counted in `RunResult::summary`.
pub fn run(config: &Config, logger: &dyn Logger) -> Result<RunResult> {
    Pipeline::new(config, logger)?.run()
}
