//! casf — CASF docking power benchmark.
//! Entry point for the command-line binary.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "casf", version, about = "CASF docking power benchmark and prediction utilities")]
struct Cli {
    /// Path to casf.toml (takes precedence over CASF_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute Top-N success rates and SP2..SP10 for a decoy table
    DockingPower(commands::DockingPowerArgs),
    /// Write predictions as a `#code score` table for the CASF scripts
    Export(commands::ExportArgs),
    /// Plot predicted against target values with a regression line
    Plot(commands::PlotArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("casf=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load_or_default(cli.config.as_deref())?;
    info!(
        "Configuration loaded. RMSD cutoff: {} A, min correlation poses: {}",
        config.docking_power.rmsd_cutoff, config.docking_power.min_correlation_poses
    );

    match cli.command {
        Command::DockingPower(args) => commands::docking_power(&config, args).await,
        Command::Export(args) => commands::export(args).await,
        Command::Plot(args) => commands::plot(&config, args).await,
    }
}
