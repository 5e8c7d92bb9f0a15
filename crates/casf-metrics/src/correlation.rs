//! Correlation and least-squares helpers.

use crate::rank::average_ranks;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Centered sums (Sxx, Syy, Sxy) and the two means.
fn centered_sums(xs: &[f64], ys: &[f64]) -> (f64, f64, f64, f64, f64) {
    let mx = mean(xs);
    let my = mean(ys);

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    (sxx, syy, sxy, mx, my)
}

/// Pearson product-moment correlation.
///
/// Returns `None` when the lengths differ, fewer than two points are given,
/// or either side has zero variance (the coefficient is undefined).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let (sxx, syy, sxy, _, _) = centered_sums(xs, ys);
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Spearman rank correlation: Pearson over average ranks.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    pearson(&average_ranks(xs), &average_ranks(ys))
}

/// Ordinary least squares fit of `ys = slope * xs + intercept`.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let (sxx, _, sxy, mx, my) = centered_sums(xs, ys);
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Round to `decimals` places, ties to even (`0.0125` becomes `0.012`).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
