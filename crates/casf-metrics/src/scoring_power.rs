//! Scoring-power summary for a predicted-vs-measured regression.
//!
//! The measured values are regressed on the predictions
//! (`target ≈ slope * predicted + intercept`) and SD is the residual
//! standard deviation with `n - 1` degrees of freedom.

use casf_common::{CasfError, Result};
use serde::{Deserialize, Serialize};

use crate::correlation::{linear_fit, pearson};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPowerSummary {
    pub n: usize,
    pub pearson_r: f64,
    pub sd: f64,
    pub slope: f64,
    pub intercept: f64,
}

pub fn scoring_power(predicted: &[f64], target: &[f64]) -> Result<ScoringPowerSummary> {
    if predicted.len() != target.len() {
        return Err(CasfError::invalid(format!(
            "predicted ({}) and target ({}) lengths differ",
            predicted.len(),
            target.len()
        )));
    }
    if predicted.len() < 3 {
        return Err(CasfError::invalid(format!(
            "scoring power needs at least 3 points, got {}",
            predicted.len()
        )));
    }
    if predicted.iter().chain(target).any(|v| !v.is_finite()) {
        return Err(CasfError::invalid("predicted/target values must be finite"));
    }

    let pearson_r = pearson(predicted, target)
        .ok_or_else(|| CasfError::invalid("predicted or target values are constant"))?;
    let (slope, intercept) = linear_fit(predicted, target)
        .ok_or_else(|| CasfError::invalid("predicted values are constant"))?;

    let n = predicted.len();
    let ssr: f64 = predicted
        .iter()
        .zip(target)
        .map(|(p, t)| (t - (slope * p + intercept)).powi(2))
        .sum();
    let sd = (ssr / (n - 1) as f64).sqrt();

    Ok(ScoringPowerSummary { n, pearson_r, sd, slope, intercept })
}
