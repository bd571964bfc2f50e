//! scrollstick - Entry Point

use clap::Parser;
use scrollstick::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
};
use scrollstick::model::{AppError, Direction};
use scrollstick::scenario::{load_scenario, render, run_scenario, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Replay scroll scenarios against a sticky element and report each step
#[derive(Parser, Debug)]
#[command(name = "scrollstick")]
#[command(version)]
#[command(about = "Replay scroll scenarios against a sticky element")]
pub struct Args {
    /// Path to a scenario file (.toml or .json)
    pub scenario: PathBuf,

    /// Report format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Default direction filter for the sticky element
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Default minimum scroll velocity before sticking
    #[arg(long)]
    pub delta: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged)?;
        apply_cli_overrides(with_env, args.direction, args.delta, args.format)
    };

    scrollstick::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let scenario = load_scenario(&args.scenario)?;
    let reports = run_scenario(&scenario, &config)?;
    let rendered = render(&reports, config.format).map_err(std::io::Error::from)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}
