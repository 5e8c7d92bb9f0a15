//! Rank transforms used by the Spearman correlation.

use std::cmp::Ordering;

/// Ascending 1-based ranks, in input order.
/// Exactly equal values share the mean of the positions they occupy.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return vec![];
    }

    // Create (original_index, value) pairs and sort ascending
    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        // Find group of equal values
        while j + 1 < n && indexed[j].1 == indexed[j + 1].1 {
            j += 1;
        }
        let avg_rank = (i + 1 + j + 1) as f64 / 2.0;
        for entry in &indexed[i..=j] {
            ranks[entry.0] = avg_rank;
        }
        i = j + 1;
    }

    ranks
}
