//! Writers for the CASF reference scripts and per-target docking detail.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use casf_common::{CasfError, Result};
use casf_metrics::docking_power::{TargetOutcome, SP_THRESHOLDS, TOP_N};
use csv::WriterBuilder;
use tracing::info;

/// Header expected by the CASF scoring/docking power scripts.
pub const PREDICTION_HEADER: [&str; 2] = ["#code", "score"];

/// Write `#code score` rows, scores rounded to two decimals, space-delimited.
pub fn write_predictions<W: Write, S: AsRef<str>>(writer: W, ids: &[S], scores: &[f64]) -> Result<()> {
    if ids.len() != scores.len() {
        return Err(CasfError::invalid(format!(
            "{} identifiers but {} scores",
            ids.len(),
            scores.len()
        )));
    }

    let mut out = WriterBuilder::new().delimiter(b' ').from_writer(writer);
    out.write_record(PREDICTION_HEADER)?;
    for (id, score) in ids.iter().zip(scores) {
        out.write_record([id.as_ref(), format!("{:.2}", score).as_str()])?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_predictions<S: AsRef<str>>(path: &Path, ids: &[S], scores: &[f64]) -> Result<()> {
    let file = File::create(path)?;
    write_predictions(file, ids, scores)?;
    info!("Saved {} predictions to {:?}", ids.len(), path);
    Ok(())
}

/// Per-target CSV: the three best-ranked poses, Top-N outcomes, and SP
/// contributions (empty where the target did not contribute).
pub fn write_target_outcomes<W: Write>(writer: W, targets: &[TargetOutcome]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["code".to_string()];
    for n in TOP_N {
        header.push(format!("Rank{}", n));
        header.push(format!("RMSD{}", n));
    }
    header.extend(TOP_N.iter().map(|n| format!("top{}", n)));
    header.extend(SP_THRESHOLDS.iter().map(|t| format!("sp{}", t)));
    out.write_record(&header)?;

    for target in targets {
        let mut row = vec![target.pdb_id.clone()];
        for slot in 0..TOP_N.len() {
            match target.ranked.get(slot) {
                Some(pose) => {
                    row.push(pose.pose_code.clone());
                    row.push(format!("{:.2}", pose.rmsd));
                }
                None => row.extend([String::new(), String::new()]),
            }
        }
        row.extend(target.top_success.iter().map(|&ok| u8::from(ok).to_string()));
        row.extend(
            target
                .sp
                .iter()
                .map(|sp| sp.map(|v| format!("{:.4}", v)).unwrap_or_default()),
        );
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}
