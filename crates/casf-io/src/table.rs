//! Reading CASF-style decoy tables.
//!
//! CASF ships whitespace-aligned `.dat` files (`#code  score`), while
//! pipelines often write plain CSV. Both are parsed through the `csv`
//! reader; whitespace tables are first collapsed to single spaces.

use std::borrow::Cow;
use std::path::Path;

use casf_common::{CasfError, PoseRecord, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

/// Accepted headers for the target identifier.
pub const PDB_ID_COLUMNS: &[&str] = &["pdb_id", "pdb"];

/// Accepted headers for the pose identifier.
pub const POSE_CODE_COLUMNS: &[&str] = &["#code", "code", "pose_code", "decoy"];

pub const SCORE_COLUMN: &str = "score";
pub const RMSD_COLUMN: &str = "rmsd";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated with a header row
    Csv,
    /// Columns separated by runs of spaces or tabs
    Whitespace,
}

impl TableFormat {
    /// `.csv` files are comma-separated; anything else is treated as whitespace-delimited.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => TableFormat::Csv,
            _ => TableFormat::Whitespace,
        }
    }
}

/// A parsed table: header plus data rows, each tagged with its 1-based file line.
struct Table {
    headers: StringRecord,
    rows: Vec<(u64, StringRecord)>,
}

impl Table {
    fn parse(content: &str, format: TableFormat) -> Result<Self> {
        let (text, delimiter): (Cow<'_, str>, u8) = match format {
            TableFormat::Csv => (Cow::Borrowed(content), b','),
            TableFormat::Whitespace => {
                // Blank lines stay in place so reported line numbers match the file
                let collapsed = content
                    .lines()
                    .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                    .collect::<Vec<_>>()
                    .join("\n");
                (Cow::Owned(collapsed), b' ')
            }
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);
            rows.push((line, record));
        }
        debug!("Parsed table with {} columns and {} rows", headers.len(), rows.len());

        Ok(Self { headers, rows })
    }

    fn column(&self, candidates: &[&str]) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| candidates.contains(&h))
            .ok_or_else(|| {
                CasfError::invalid(format!(
                    "missing required column (expected one of: {})",
                    candidates.join(", ")
                ))
            })
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, column: &str, line: u64) -> Result<&'r str> {
    record
        .get(idx)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CasfError::invalid(format!("line {} has no value for '{}'", line, column)))
}

fn numeric(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64> {
    let raw = field(record, idx, column, line)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CasfError::invalid(format!(
            "line {} has a non-numeric {} '{}'",
            line, column, raw
        ))),
    }
}

/// Parse a decoy table with target, pose, score and RMSD columns.
pub fn parse_pose_table(content: &str, format: TableFormat) -> Result<Vec<PoseRecord>> {
    let table = Table::parse(content, format)?;
    let pdb_idx = table.column(PDB_ID_COLUMNS)?;
    let code_idx = table.column(POSE_CODE_COLUMNS)?;
    let score_idx = table.column(&[SCORE_COLUMN])?;
    let rmsd_idx = table.column(&[RMSD_COLUMN])?;

    table
        .rows
        .iter()
        .map(|(line, record)| {
            let line = *line;
            Ok(PoseRecord {
                pdb_id: field(record, pdb_idx, PDB_ID_COLUMNS[0], line)?.to_string(),
                pose_code: field(record, code_idx, POSE_CODE_COLUMNS[0], line)?.to_string(),
                score: numeric(record, score_idx, SCORE_COLUMN, line)?,
                rmsd: numeric(record, rmsd_idx, RMSD_COLUMN, line)?,
            })
        })
        .collect()
}

/// Read a decoy table from disk, choosing the format from the extension.
pub fn load_pose_table(path: &Path) -> Result<Vec<PoseRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records = parse_pose_table(&content, TableFormat::from_path(path))?;
    info!("Loaded {} poses from {:?}", records.len(), path);
    Ok(records)
}

/// Two numeric columns, e.g. predicted and measured affinities.
pub fn parse_paired_values(
    content: &str,
    format: TableFormat,
    first_col: &str,
    second_col: &str,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let table = Table::parse(content, format)?;
    let first_idx = table.column(&[first_col])?;
    let second_idx = table.column(&[second_col])?;

    let mut first = Vec::with_capacity(table.rows.len());
    let mut second = Vec::with_capacity(table.rows.len());
    for (line, record) in &table.rows {
        first.push(numeric(record, first_idx, first_col, *line)?);
        second.push(numeric(record, second_idx, second_col, *line)?);
    }
    Ok((first, second))
}

/// A text label column alongside a numeric column.
pub fn parse_labelled_values(
    content: &str,
    format: TableFormat,
    label_col: &str,
    value_col: &str,
) -> Result<(Vec<String>, Vec<f64>)> {
    let table = Table::parse(content, format)?;
    let label_idx = table.column(&[label_col])?;
    let value_idx = table.column(&[value_col])?;

    let mut labels = Vec::with_capacity(table.rows.len());
    let mut values = Vec::with_capacity(table.rows.len());
    for (line, record) in &table.rows {
        labels.push(field(record, label_idx, label_col, *line)?.to_string());
        values.push(numeric(record, value_idx, value_col, *line)?);
    }
    Ok((labels, values))
}
