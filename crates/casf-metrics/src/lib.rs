//! casf-metrics — CASF benchmark statistics.
//! Docking power (Top-N success, SP2..SP10) and the scoring-power summary
//! used to annotate regression plots.

pub mod rank;
pub mod correlation;
pub mod docking_power;
pub mod scoring_power;

pub use docking_power::{
    evaluate, DockingPowerConfig, DockingPowerEvaluator, DockingPowerReport,
    DockingPowerResult, MetricValue, TargetOutcome, TopNSummary,
};
pub use scoring_power::{scoring_power, ScoringPowerSummary};
