mod cli;
mod config;
mod error;
mod evaluator;
mod extract;
mod grader;
mod rubric;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use config::GraderConfig;
use evaluator::CommandEvaluator;
use grader::{GradeResult, Grader};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};
use ui::GradeProgress;

/// Printed verbatim when the positional arguments are missing or malformed.
const INVALID_ARGUMENTS: &str = r#"{"score": 0, "reasoning": "Invalid arguments"}"#;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{INVALID_ARGUMENTS}");
            eprint!("{}", err.render());
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    let (result, code) = match run(&cli).await {
        Ok(result) => (result, ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!("{err:#}");
            (GradeResult::system_error(&err), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(payload) => {
            println!("{payload}");
            code
        }
        Err(err) => {
            tracing::error!("failed to serialize result: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and grades the requested document. Only setup
/// failures surface as errors; grading failures are part of the result.
async fn run(cli: &Cli) -> Result<GradeResult> {
    let mut config = GraderConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    tracing::debug!(?config, "effective configuration");

    let grader = Grader::with_max_content_chars(
        CommandEvaluator::from_config(&config.evaluator),
        config.max_content_chars,
    );

    let request = cli.request();
    let progress = GradeProgress::start(&request.file_path.display().to_string(), !cli.quiet);
    let result = grader.grade(&request).await;
    progress.complete(&result);
    Ok(result)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false);
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();
}
