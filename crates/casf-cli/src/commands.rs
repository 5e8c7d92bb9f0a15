//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use casf_io::{
    load_pose_table, parse_labelled_values, parse_paired_values, plot_linear_reg,
    write_predictions, write_target_outcomes, PlotOptions, TableFormat,
};
use casf_metrics::{scoring_power, DockingPowerConfig, DockingPowerEvaluator};
use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct DockingPowerArgs {
    /// Decoy table (`.csv`, otherwise whitespace-delimited)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Near-native RMSD cutoff in angstroms
    #[arg(long)]
    pub cutoff: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the metrics here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-target ranking detail as CSV
    #[arg(long)]
    pub targets_out: Option<PathBuf>,

    /// Score targets in parallel
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Table holding identifiers and predicted scores
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long, default_value = "#code")]
    pub id_col: String,

    #[arg(long, default_value = "score")]
    pub score_col: String,

    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Table holding predicted and target values
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long, default_value = "predicted")]
    pub predicted_col: String,

    #[arg(long, default_value = "target")]
    pub target_col: String,

    /// Figure path (`.png` requests are written as `.svg`)
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

async fn read_table(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))
}

async fn write_output(path: &Path, content: impl AsRef<[u8]>) -> anyhow::Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {:?}", path))
}

/// Config-file settings with the command-line overrides applied.
fn docking_power_settings(config: &Config, args: &DockingPowerArgs) -> DockingPowerConfig {
    let mut settings = config.docking_power.clone();
    if let Some(cutoff) = args.cutoff {
        settings.rmsd_cutoff = cutoff;
    }
    if args.parallel {
        settings.parallel = true;
    }
    settings
}

fn plot_options(config: &Config, args: &PlotArgs) -> PlotOptions {
    let mut options = config.plot;
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    options
}

pub async fn docking_power(config: &Config, args: DockingPowerArgs) -> anyhow::Result<()> {
    let records = load_pose_table(&args.input)
        .with_context(|| format!("Invalid decoy table {:?}", args.input))?;

    let settings = docking_power_settings(config, &args);
    let report = DockingPowerEvaluator::new(settings).report(&records)?;
    let rendered = match args.format {
        OutputFormat::Text => report.summary.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report.summary)?,
    };

    match args.output {
        Some(ref path) => {
            write_output(path, rendered).await?;
            info!("Docking power written to {:?}", path);
        }
        None => println!("{}", rendered.trim_end()),
    }

    if let Some(ref path) = args.targets_out {
        let mut buf = Vec::new();
        write_target_outcomes(&mut buf, &report.targets)?;
        write_output(path, buf).await?;
        info!("Per-target detail for {} targets written to {:?}", report.targets.len(), path);
    }

    Ok(())
}

pub async fn export(args: ExportArgs) -> anyhow::Result<()> {
    let content = read_table(&args.input).await?;
    let (ids, scores) = parse_labelled_values(
        &content,
        TableFormat::from_path(&args.input),
        &args.id_col,
        &args.score_col,
    )
    .with_context(|| format!("Invalid prediction table {:?}", args.input))?;

    let mut buf = Vec::new();
    write_predictions(&mut buf, &ids, &scores)?;
    write_output(&args.output, buf).await?;
    info!("Saved {} predictions to {:?}", ids.len(), args.output);
    Ok(())
}

pub async fn plot(config: &Config, args: PlotArgs) -> anyhow::Result<()> {
    let content = read_table(&args.input).await?;
    let (predicted, target) = parse_paired_values(
        &content,
        TableFormat::from_path(&args.input),
        &args.predicted_col,
        &args.target_col,
    )
    .with_context(|| format!("Invalid prediction table {:?}", args.input))?;

    let summary = scoring_power(&predicted, &target)?;
    info!(
        "Scoring power over {} complexes: R = {:.3}, SD = {:.3}",
        summary.n, summary.pearson_r, summary.sd
    );

    let options = plot_options(config, &args);
    let written = plot_linear_reg(
        &predicted,
        &target,
        summary.pearson_r,
        summary.sd,
        &args.output,
        &options,
    )?;
    println!("{}", written.display());
    Ok(())
}
