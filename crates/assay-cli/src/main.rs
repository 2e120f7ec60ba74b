use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod input;
mod output;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("assay error: {error:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every checked document was valid.
fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = match flags.config.as_deref() {
        Some(path) => assay_config::AssayConfig::load_with_file(path),
        None => assay_config::AssayConfig::load_with_dotenv(),
    }
    .context("failed to load assay configuration")?;
    tracing::debug!(?config, "configuration loaded");

    commands::dispatch(&cli.command, &flags, &config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ASSAY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
