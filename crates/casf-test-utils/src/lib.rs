//! Fixture builders for CASF benchmark tests.

use casf_common::PoseRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Poses for one target from `(score, rmsd)` pairs, coded `{pdb_id}_{i}` from 1.
pub fn target_poses(pdb_id: &str, poses: &[(f64, f64)]) -> Vec<PoseRecord> {
    poses
        .iter()
        .enumerate()
        .map(|(i, &(score, rmsd))| {
            PoseRecord::new(pdb_id, format!("{}_{}", pdb_id, i + 1), score, rmsd)
        })
        .collect()
}

/// Builds a multi-target table, targets appended in call order.
#[derive(Debug, Default)]
pub struct PoseTableBuilder {
    records: Vec<PoseRecord>,
}

impl PoseTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, pdb_id: &str, poses: &[(f64, f64)]) -> Self {
        self.records.extend(target_poses(pdb_id, poses));
        self
    }

    pub fn build(self) -> Vec<PoseRecord> {
        self.records
    }
}

/// Seeded random decoy table.
///
/// RMSDs are uniform in [0, 12) Å. Scores are distinct within each target
/// and loosely anti-correlated with RMSD, so ranks never tie.
pub fn random_dataset(seed: u64, n_targets: usize, poses_per_target: usize) -> Vec<PoseRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(n_targets * poses_per_target);

    for t in 0..n_targets {
        let pdb_id = format!("{}x{:02}", t % 10, t);
        let mut rmsds: Vec<f64> = (0..poses_per_target)
            .map(|_| rng.gen_range(0.0..12.0))
            .collect();
        rmsds.sort_by(|a, b| a.total_cmp(b));

        // Strictly decreasing base, with noise smaller than the spacing
        let mut scores: Vec<f64> = (0..poses_per_target)
            .map(|i| (poses_per_target - i) as f64 + rng.gen_range(0.0..0.9))
            .collect();
        // Swap a few neighbours so the predictor is imperfect
        for i in 1..poses_per_target {
            if rng.gen_bool(0.3) {
                scores.swap(i - 1, i);
            }
        }

        for (i, (score, rmsd)) in scores.into_iter().zip(rmsds).enumerate() {
            records.push(PoseRecord::new(
                pdb_id.clone(),
                format!("{}_{}", pdb_id, i + 1),
                score,
                rmsd,
            ));
        }
    }

    records
}

/// Seeded permutation of the rows.
pub fn shuffled(records: &[PoseRecord], seed: u64) -> Vec<PoseRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = records.to_vec();
    out.shuffle(&mut rng);
    out
}
