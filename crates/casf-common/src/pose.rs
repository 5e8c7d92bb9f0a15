//! Pose records: one row of a docking-power decoy table.

use serde::{Deserialize, Serialize};

use crate::error::{CasfError, Result};

/// A single scored decoy pose for one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    /// Target / receptor identifier (e.g. "1a30")
    pub pdb_id: String,
    /// Decoy identifier (e.g. "1a30_12")
    pub pose_code: String,
    /// Predictor output; higher is predicted better
    pub score: f64,
    /// Deviation from the native pose in Ångströms; lower is better
    pub rmsd: f64,
}

impl PoseRecord {
    pub fn new(
        pdb_id: impl Into<String>,
        pose_code: impl Into<String>,
        score: f64,
        rmsd: f64,
    ) -> Self {
        Self {
            pdb_id: pdb_id.into(),
            pose_code: pose_code.into(),
            score,
            rmsd,
        }
    }

    /// Reject rows the evaluator cannot rank or threshold.
    pub fn validate(&self) -> Result<()> {
        if self.pdb_id.is_empty() {
            return Err(CasfError::invalid(format!(
                "pose '{}' has an empty pdb_id",
                self.pose_code
            )));
        }
        if !self.score.is_finite() {
            return Err(CasfError::invalid(format!(
                "pose '{}' of {} has a non-finite score ({})",
                self.pose_code, self.pdb_id, self.score
            )));
        }
        if !self.rmsd.is_finite() || self.rmsd < 0.0 {
            return Err(CasfError::invalid(format!(
                "pose '{}' of {} has an invalid rmsd ({})",
                self.pose_code, self.pdb_id, self.rmsd
            )));
        }
        Ok(())
    }
}
