//! CASF docking power.
//!
//! For every target the decoys are ranked by predicted score and two
//! families of statistics are collected in a single pass:
//!
//! * Top-N success (N = 1, 2, 3): the lowest RMSD among the N best-scored
//!   poses is within `rmsd_cutoff`.
//! * SP(T) for T = 2..=10 Å: the negated Spearman correlation between score
//!   and RMSD over poses with `rmsd <= T`, when at least
//!   `min_correlation_poses` poses qualify.
//!
//! The per-target records are then reduced into a [`DockingPowerResult`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use casf_common::{CasfError, PoseRecord, Result};
use rayon::prelude::*;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::correlation::{round_to, spearman};

/// Ranks evaluated for Top-N success.
pub const TOP_N: [usize; 3] = [1, 2, 3];

/// RMSD bands (Å) evaluated for SP(T).
pub const SP_THRESHOLDS: [u32; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];

/// CASF near-native definition.
pub const DEFAULT_RMSD_CUTOFF: f64 = 2.0;

/// Poses needed inside a band before its correlation is computed.
pub const DEFAULT_MIN_CORRELATION_POSES: usize = 5;

// ── Configuration ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingPowerConfig {
    /// RMSD (Å) at or below which a pose counts as near-native
    #[serde(default = "default_rmsd_cutoff")]
    pub rmsd_cutoff: f64,
    /// Minimum qualifying poses for a target to contribute to SP(T)
    #[serde(default = "default_min_correlation_poses")]
    pub min_correlation_poses: usize,
    /// Score targets on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_rmsd_cutoff() -> f64 { DEFAULT_RMSD_CUTOFF }
fn default_min_correlation_poses() -> usize { DEFAULT_MIN_CORRELATION_POSES }

impl Default for DockingPowerConfig {
    fn default() -> Self {
        Self {
            rmsd_cutoff: DEFAULT_RMSD_CUTOFF,
            min_correlation_poses: DEFAULT_MIN_CORRELATION_POSES,
            parallel: false,
        }
    }
}

impl DockingPowerConfig {
    pub fn with_cutoff(mut self, rmsd_cutoff: f64) -> Self {
        self.rmsd_cutoff = rmsd_cutoff;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.rmsd_cutoff.is_finite() || self.rmsd_cutoff <= 0.0 {
            return Err(CasfError::invalid(format!(
                "rmsd_cutoff must be a positive number of angstroms, got {}",
                self.rmsd_cutoff
            )));
        }
        // A rank correlation needs at least two points
        if self.min_correlation_poses < 2 {
            return Err(CasfError::invalid(format!(
                "min_correlation_poses must be at least 2, got {}",
                self.min_correlation_poses
            )));
        }
        Ok(())
    }
}

// ── Per-target outcome ─────────────────────────────────────────────────────

/// One of the best-scored poses of a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPose {
    pub rank: usize,
    pub pose_code: String,
    pub score: f64,
    pub rmsd: f64,
}

/// Everything a single target contributes to the benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetOutcome {
    pub pdb_id: String,
    pub n_poses: usize,
    /// Up to three best-scored poses, best first
    pub ranked: Vec<RankedPose>,
    /// Indexed like [`TOP_N`]
    pub top_success: [bool; 3],
    /// Negated Spearman coefficient per band, indexed like [`SP_THRESHOLDS`].
    /// `None` means the target contributes nothing to that band.
    pub sp: [Option<f64>; 9],
}

impl TargetOutcome {
    pub fn top_success(&self, n: usize) -> Option<bool> {
        top_slot(n).map(|slot| self.top_success[slot])
    }

    pub fn sp(&self, threshold: u32) -> Option<f64> {
        sp_slot(threshold).and_then(|slot| self.sp[slot])
    }
}

fn top_slot(n: usize) -> Option<usize> {
    TOP_N.iter().position(|&candidate| candidate == n)
}

fn sp_slot(threshold: u32) -> Option<usize> {
    SP_THRESHOLDS.iter().position(|&candidate| candidate == threshold)
}

// ── Aggregate result ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopNSummary {
    /// Targets with a near-native pose among the N best-scored
    pub correct: usize,
    /// `correct / n_targets * 100`
    pub success: f64,
}

/// Value of one named benchmark metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Value(f64),
    /// No target contributed (distinct from a zero correlation)
    Undefined,
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            MetricValue::Count(c) => Some(c as f64),
            MetricValue::Value(v) => Some(v),
            MetricValue::Undefined => None,
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            MetricValue::Count(c) => serializer.serialize_u64(c as u64),
            MetricValue::Value(v) => serializer.serialize_f64(v),
            MetricValue::Undefined => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(c) => write!(f, "{}", c),
            MetricValue::Value(v) => write!(f, "{:.3}", v),
            MetricValue::Undefined => write!(f, "n/a"),
        }
    }
}

/// Docking power summary.
///
/// Serialises as a flat map with keys `sp2`..`sp10`, then
/// `top{N}_correct` / `top{N}_success` for N = 1..3.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingPowerResult {
    pub n_targets: usize,
    /// Mean SP(T) rounded to 3 decimals, indexed like [`SP_THRESHOLDS`]
    pub sp: [Option<f64>; 9],
    /// Indexed like [`TOP_N`]
    pub top: [TopNSummary; 3],
}

impl DockingPowerResult {
    pub fn sp(&self, threshold: u32) -> Option<f64> {
        sp_slot(threshold).and_then(|slot| self.sp[slot])
    }

    pub fn top(&self, n: usize) -> Option<TopNSummary> {
        top_slot(n).map(|slot| self.top[slot])
    }

    /// Named metrics in their canonical output order.
    pub fn metrics(&self) -> Vec<(String, MetricValue)> {
        let mut out = Vec::with_capacity(SP_THRESHOLDS.len() + 2 * TOP_N.len());
        for (threshold, value) in SP_THRESHOLDS.iter().zip(self.sp) {
            let value = value.map_or(MetricValue::Undefined, MetricValue::Value);
            out.push((format!("sp{}", threshold), value));
        }
        for (n, summary) in TOP_N.iter().zip(self.top) {
            out.push((format!("top{}_correct", n), MetricValue::Count(summary.correct)));
            out.push((format!("top{}_success", n), MetricValue::Value(summary.success)));
        }
        out
    }
}

impl Serialize for DockingPowerResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let metrics = self.metrics();
        let mut map = serializer.serialize_map(Some(metrics.len()))?;
        for (name, value) in &metrics {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for DockingPowerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Docking power over {} targets", self.n_targets)?;
        for (n, summary) in TOP_N.iter().zip(self.top) {
            writeln!(
                f,
                "  Top{}  {:>5} correct  {:>6.2}%",
                n, summary.correct, summary.success
            )?;
        }
        for (threshold, value) in SP_THRESHOLDS.iter().zip(self.sp) {
            let value = value.map_or(MetricValue::Undefined, MetricValue::Value);
            writeln!(f, "  SP{:<3} {:>7}", threshold, value.to_string())?;
        }
        Ok(())
    }
}

/// Summary plus the per-target detail it was reduced from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DockingPowerReport {
    pub summary: DockingPowerResult,
    /// Ordered by `pdb_id`
    pub targets: Vec<TargetOutcome>,
}

// ── Evaluator ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DockingPowerEvaluator {
    config: DockingPowerConfig,
}

impl DockingPowerEvaluator {
    pub fn new(config: DockingPowerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DockingPowerConfig {
        &self.config
    }

    pub fn evaluate(&self, records: &[PoseRecord]) -> Result<DockingPowerResult> {
        Ok(self.report(records)?.summary)
    }

    pub fn report(&self, records: &[PoseRecord]) -> Result<DockingPowerReport> {
        self.config.validate()?;
        if records.is_empty() {
            return Err(CasfError::invalid("no pose records to evaluate"));
        }
        for record in records {
            record.validate()?;
        }

        let groups: Vec<(&str, Vec<&PoseRecord>)> = group_by_target(records).into_iter().collect();
        debug!(
            "Scoring {} poses across {} targets (parallel: {})",
            records.len(),
            groups.len(),
            self.config.parallel
        );

        let targets: Vec<TargetOutcome> = if self.config.parallel {
            groups
                .par_iter()
                .map(|(pdb_id, poses)| score_target(pdb_id, poses, &self.config))
                .collect()
        } else {
            groups
                .iter()
                .map(|(pdb_id, poses)| score_target(pdb_id, poses, &self.config))
                .collect()
        };

        let summary = reduce(&targets);
        for (threshold, value) in SP_THRESHOLDS.iter().zip(summary.sp) {
            if value.is_none() {
                warn!(
                    "SP{} undefined: no target has {} or more poses within {} A",
                    threshold, self.config.min_correlation_poses, threshold
                );
            }
        }
        info!(
            "Docking power: {} targets, top1 {:.1}%, top2 {:.1}%, top3 {:.1}%",
            summary.n_targets, summary.top[0].success, summary.top[1].success, summary.top[2].success
        );

        Ok(DockingPowerReport { summary, targets })
    }
}

/// Evaluate docking power with the default configuration and the given cutoff.
pub fn evaluate(records: &[PoseRecord], rmsd_cutoff: f64) -> Result<DockingPowerResult> {
    DockingPowerEvaluator::new(DockingPowerConfig::default().with_cutoff(rmsd_cutoff))
        .evaluate(records)
}

/// Partition by target, keeping input row order inside each group.
fn group_by_target(records: &[PoseRecord]) -> BTreeMap<&str, Vec<&PoseRecord>> {
    let mut groups: BTreeMap<&str, Vec<&PoseRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.pdb_id.as_str()).or_default().push(record);
    }
    groups
}

fn score_target(pdb_id: &str, poses: &[&PoseRecord], config: &DockingPowerConfig) -> TargetOutcome {
    if poses.len() < TOP_N[TOP_N.len() - 1] {
        warn!(
            "{} has only {} poses; Top-N uses the poses available",
            pdb_id,
            poses.len()
        );
    }

    // Stable: equal scores keep their input order
    let mut ranked: Vec<&PoseRecord> = poses.to_vec();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut top_success = [false; 3];
    for (slot, &n) in TOP_N.iter().enumerate() {
        let best_rmsd = ranked
            .iter()
            .take(n)
            .map(|pose| pose.rmsd)
            .fold(f64::INFINITY, f64::min);
        top_success[slot] = best_rmsd <= config.rmsd_cutoff;
    }

    let mut sp = [None; 9];
    for (slot, &threshold) in SP_THRESHOLDS.iter().enumerate() {
        let mut band: Vec<&PoseRecord> = poses
            .iter()
            .copied()
            .filter(|pose| pose.rmsd <= f64::from(threshold))
            .collect();
        if band.len() < config.min_correlation_poses {
            continue;
        }

        // Canonical order so the float sums do not depend on row order
        band.sort_by(|a, b| {
            a.rmsd
                .total_cmp(&b.rmsd)
                .then(a.score.total_cmp(&b.score))
                .then_with(|| a.pose_code.cmp(&b.pose_code))
        });
        let scores: Vec<f64> = band.iter().map(|pose| pose.score).collect();
        let rmsds: Vec<f64> = band.iter().map(|pose| pose.rmsd).collect();

        // Good predictors rank low RMSD highest, so flip the sign
        sp[slot] = spearman(&scores, &rmsds).map(|rho| -rho);
    }

    debug!(
        "{}: {} poses, top1 {}, top2 {}, top3 {}",
        pdb_id,
        poses.len(),
        top_success[0],
        top_success[1],
        top_success[2]
    );

    TargetOutcome {
        pdb_id: pdb_id.to_string(),
        n_poses: poses.len(),
        ranked: ranked
            .iter()
            .take(TOP_N[TOP_N.len() - 1])
            .enumerate()
            .map(|(i, pose)| RankedPose {
                rank: i + 1,
                pose_code: pose.pose_code.clone(),
                score: pose.score,
                rmsd: pose.rmsd,
            })
            .collect(),
        top_success,
        sp,
    }
}

fn reduce(targets: &[TargetOutcome]) -> DockingPowerResult {
    let n_targets = targets.len();

    let mut correct = [0usize; 3];
    let mut sp_sum = [0.0f64; 9];
    let mut sp_count = [0usize; 9];
    for target in targets {
        for (slot, &success) in target.top_success.iter().enumerate() {
            if success {
                correct[slot] += 1;
            }
        }
        for (slot, value) in target.sp.iter().enumerate() {
            if let Some(value) = value {
                sp_sum[slot] += value;
                sp_count[slot] += 1;
            }
        }
    }

    let top = std::array::from_fn(|slot| TopNSummary {
        correct: correct[slot],
        success: 100.0 * correct[slot] as f64 / n_targets as f64,
    });
    let sp = std::array::from_fn(|slot| {
        (sp_count[slot] > 0).then(|| round_to(sp_sum[slot] / sp_count[slot] as f64, 3))
    });

    DockingPowerResult { n_targets, sp, top }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casf_test_utils::{random_dataset, shuffled, target_poses, PoseTableBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_pose_scenario_all_ranks_succeed() {
        let records = target_poses("T1", &[(10.0, 1.5), (8.0, 3.0), (5.0, 0.5)]);
        let result = evaluate(&records, 2.0).unwrap();

        assert_eq!(result.n_targets, 1);
        for n in TOP_N {
            let top = result.top(n).unwrap();
            assert_eq!(top.correct, 1);
            assert_eq!(top.success, 100.0);
        }
    }

    #[test]
    fn test_top1_miss_rescued_at_top3() {
        // Best-scored pose is far from native; the near-native one is ranked third
        let records = target_poses("T1", &[(10.0, 4.0), (8.0, 3.0), (5.0, 0.5)]);
        let report = DockingPowerEvaluator::default().report(&records).unwrap();
        let target = &report.targets[0];

        assert_eq!(target.top_success, [false, false, true]);
        assert_eq!(target.ranked[0].pose_code, "T1_1");
        assert_eq!(target.ranked[2].rmsd, 0.5);
    }

    #[test]
    fn test_half_of_targets_succeed() {
        let records = PoseTableBuilder::new()
            .target("good", &[(9.0, 0.8), (7.0, 5.0), (1.0, 6.0)])
            .target("bad", &[(9.0, 7.5), (7.0, 5.0), (1.0, 1.0)])
            .build();
        let result = evaluate(&records, 2.0).unwrap();

        let top1 = result.top(1).unwrap();
        assert_eq!(top1.correct, 1);
        assert_eq!(top1.success, 50.0);
        assert_eq!(result.top(3).unwrap().correct, 2);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let records = target_poses("T1", &[(3.0, 2.0), (2.0, 9.0), (1.0, 9.0)]);
        let result = evaluate(&records, 2.0).unwrap();
        assert_eq!(result.top(1).unwrap().correct, 1);
    }

    #[test]
    fn test_score_ties_keep_row_order() {
        let records = target_poses("T1", &[(5.0, 8.0), (5.0, 0.5), (1.0, 9.0)]);
        let report = DockingPowerEvaluator::default().report(&records).unwrap();
        let target = &report.targets[0];

        assert_eq!(target.ranked[0].pose_code, "T1_1");
        assert_eq!(target.top_success, [false, true, true]);
    }

    #[test]
    fn test_short_target_uses_available_poses() {
        let records = target_poses("T1", &[(5.0, 0.4)]);
        let report = DockingPowerEvaluator::default().report(&records).unwrap();

        assert_eq!(report.targets[0].ranked.len(), 1);
        assert_eq!(report.targets[0].top_success, [true, true, true]);
    }

    #[test]
    fn test_four_poses_leave_sp2_undefined() {
        let records = target_poses("T1", &[(4.0, 0.5), (3.0, 1.0), (2.0, 1.5), (1.0, 2.0)]);
        let result = evaluate(&records, 2.0).unwrap();

        for threshold in SP_THRESHOLDS {
            assert_eq!(result.sp(threshold), None, "sp{} should be undefined", threshold);
        }
    }

    #[test]
    fn test_sp_defined_only_where_band_is_full() {
        // Four poses within 2 A, a fifth at 2.5 A
        let records = target_poses(
            "T1",
            &[(5.0, 0.5), (4.0, 1.0), (3.0, 1.5), (2.0, 2.0), (1.0, 2.5)],
        );
        let result = evaluate(&records, 2.0).unwrap();

        assert_eq!(result.sp(2), None);
        assert_eq!(result.sp(3), Some(1.0));
        assert_eq!(result.sp(10), Some(1.0));
    }

    #[test]
    fn test_inverted_predictor_gives_negative_sp() {
        let records = target_poses(
            "T1",
            &[(1.0, 0.5), (2.0, 1.0), (3.0, 1.5), (4.0, 2.0), (5.0, 2.5)],
        );
        let result = evaluate(&records, 2.0).unwrap();
        assert_eq!(result.sp(3), Some(-1.0));
    }

    #[test]
    fn test_zero_mean_is_not_undefined() {
        let records = PoseTableBuilder::new()
            .target("A", &[(5.0, 0.5), (4.0, 1.0), (3.0, 1.5), (2.0, 2.0), (1.0, 2.5)])
            .target("B", &[(1.0, 0.5), (2.0, 1.0), (3.0, 1.5), (4.0, 2.0), (5.0, 2.5)])
            .build();
        let result = evaluate(&records, 2.0).unwrap();
        assert_eq!(result.sp(3), Some(0.0));
    }

    #[test]
    fn test_constant_scores_do_not_contribute() {
        let records = PoseTableBuilder::new()
            .target("flat", &[(1.0, 0.5), (1.0, 1.0), (1.0, 1.5), (1.0, 2.0), (1.0, 2.5)])
            .target("good", &[(5.0, 0.5), (4.0, 1.0), (3.0, 1.5), (2.0, 2.0), (1.0, 2.5)])
            .build();
        let report = DockingPowerEvaluator::default().report(&records).unwrap();

        assert_eq!(report.targets[0].sp(3), None);
        assert_eq!(report.summary.sp(3), Some(1.0));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(evaluate(&[], 2.0), Err(CasfError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_cutoff_rejected() {
        let records = target_poses("T1", &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert!(matches!(evaluate(&records, 0.0), Err(CasfError::InvalidInput(_))));
        assert!(matches!(evaluate(&records, -1.0), Err(CasfError::InvalidInput(_))));
        assert!(matches!(evaluate(&records, f64::NAN), Err(CasfError::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let records = target_poses("T1", &[(1.0, 1.0), (f64::INFINITY, 2.0), (3.0, 3.0)]);
        assert!(matches!(evaluate(&records, 2.0), Err(CasfError::InvalidInput(_))));
    }

    #[test]
    fn test_success_rates_bounded_and_monotone() {
        for seed in 0..8 {
            let records = random_dataset(seed, 25, 40);
            let result = evaluate(&records, 2.0).unwrap();

            for summary in result.top {
                assert!((0.0..=100.0).contains(&summary.success));
                assert_eq!(
                    summary.success,
                    100.0 * summary.correct as f64 / result.n_targets as f64
                );
            }
            assert!(result.top[0].success <= result.top[1].success);
            assert!(result.top[1].success <= result.top[2].success);
        }
    }

    #[test]
    fn test_success_rate_scales_before_dividing() {
        let records = PoseTableBuilder::new()
            .target("T1", &[(10.0, 0.5), (8.0, 3.0), (5.0, 4.0)])
            .target("T2", &[(10.0, 5.0), (8.0, 3.0), (5.0, 4.0)])
            .target("T3", &[(10.0, 6.0), (8.0, 7.0), (5.0, 8.0)])
            .build();
        let result = evaluate(&records, 2.0).unwrap();

        assert_eq!(result.top[0].correct, 1);
        assert_eq!(result.top[0].success, 100.0 * 1.0 / 3.0);
        assert_eq!(result.top[0].success, 33.333333333333336);
    }

    #[test]
    fn test_sp_mean_rounds_half_to_even() {
        // One target with SP 0.1 and seven with SP 0 average to exactly 0.0125
        let rmsds = [0.5, 1.0, 1.5, 1.8, 2.0];
        let poses = |scores: [f64; 5]| -> Vec<(f64, f64)> {
            scores.into_iter().zip(rmsds).collect()
        };
        let mut builder = PoseTableBuilder::new().target("A0", &poses([2.0, 4.0, 5.0, 1.0, 3.0]));
        for i in 1..8 {
            builder = builder.target(&format!("A{}", i), &poses([2.0, 5.0, 3.0, 1.0, 4.0]));
        }
        let report = DockingPowerEvaluator::default().report(&builder.build()).unwrap();

        assert_eq!(report.targets[0].sp[0], Some(0.1));
        assert!(report.targets[1..].iter().all(|t| t.sp[0] == Some(0.0)));
        assert_eq!(report.summary.sp(2), Some(0.012));
    }

    #[test]
    fn test_sp_within_unit_interval() {
        let records = random_dataset(11, 30, 60);
        let result = evaluate(&records, 2.0).unwrap();
        let defined: Vec<f64> = result.sp.iter().flatten().copied().collect();

        assert!(!defined.is_empty());
        assert!(defined.iter().all(|sp| (-1.0..=1.0).contains(sp)));
    }

    #[test]
    fn test_idempotent() {
        let records = random_dataset(3, 20, 30);
        let first = evaluate(&records, 2.0).unwrap();
        let second = evaluate(&records, 2.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_order_independent() {
        let records = random_dataset(5, 20, 30);
        let baseline = evaluate(&records, 2.0).unwrap();

        for seed in 0..5 {
            let permuted = shuffled(&records, seed);
            assert_eq!(evaluate(&permuted, 2.0).unwrap(), baseline);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = random_dataset(7, 50, 40);
        let sequential = DockingPowerEvaluator::default().report(&records).unwrap();
        let parallel = DockingPowerEvaluator::new(DockingPowerConfig::default().with_parallel(true))
            .report(&records)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_metric_map_keys_and_nulls() {
        let records = target_poses("T1", &[(10.0, 1.5), (8.0, 3.0), (5.0, 0.5)]);
        let result = evaluate(&records, 2.0).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        let mut expected = vec![
            "sp10", "sp2", "sp3", "sp4", "sp5", "sp6", "sp7", "sp8", "sp9",
            "top1_correct", "top1_success", "top2_correct", "top2_success",
            "top3_correct", "top3_success",
        ];
        let mut sorted_keys = keys.clone();
        sorted_keys.sort();
        expected.sort();
        assert_eq!(sorted_keys, expected);

        assert!(json["sp2"].is_null());
        assert_eq!(json["top1_correct"], serde_json::json!(1));
        assert_eq!(json["top1_success"], serde_json::json!(100.0));
    }

    #[test]
    fn test_metrics_canonical_order() {
        let records = target_poses("T1", &[(10.0, 1.5), (8.0, 3.0), (5.0, 0.5)]);
        let names: Vec<String> = evaluate(&records, 2.0)
            .unwrap()
            .metrics()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names.first().map(String::as_str), Some("sp2"));
        assert_eq!(names[8], "sp10");
        assert_eq!(names.last().map(String::as_str), Some("top3_success"));
    }
}
