use clap::Parser;
use customer_importer_cli::args::Args;
use customer_importer_cli::config::{self, Settings};
use customer_importer_cli::error::{AppError, Result};
use customer_importer_cli::{logging, presentation};
use customer_importer_engine::logger::LogFacade;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    // Env file first: LOG_FORMAT and RUST_LOG may come from it.
    let env_file = config::load_env_file(args.env_file.as_deref());

    let settings = env_file.and_then(|_| Settings::load(&args));
    let log_format = settings
        .as_ref()
        .map(|s| s.log_format)
        .ok()
        .or(args.log_format)
        .unwrap_or_default();

    if let Err(e) = logging::init_logging(log_format) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let outcome = settings
        .map_err(AppError::from)
        .and_then(|settings| run(&settings, &args));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.already_reported() => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, args: &Args) -> Result<()> {
    let config = settings.engine_config()?;
    tracing::info!(
        input = %config.input_path.display(),
        concurrency = config.concurrency,
        read_buffer_size = config.read_buffer_size,
        "Starting import"
    );

    let result = customer_importer_engine::run(&config, &LogFacade)?;
    if let Some(rendered) = presentation::render(&result, args.format)? {
        println!("{rendered}");
    }
    Ok(())
}
