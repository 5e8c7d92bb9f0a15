//! Predicted-vs-target regression figure (plotters, SVG output).
//!
//! Uses the SVG backend to avoid system font dependencies; a `.png`
//! request is written next to it as `.svg`.

use std::path::{Path, PathBuf};

use casf_common::{CasfError, Result};
use casf_metrics::correlation::linear_fit;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const ORANGE: RGBColor = RGBColor(255, 140, 0);

/// Coverage of the shaded band around the fitted line.
const CONFIDENCE_LEVEL: f64 = 0.95;
const BOOTSTRAP_SAMPLES: usize = 1000;
const BAND_POINTS: usize = 100;
/// Fixed so the same data always renders the same figure.
const BOOTSTRAP_SEED: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 { 1600 }
fn default_height() -> u32 { 1200 }

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Scatter of predicted against target values with the identity line, the
/// least-squares fit of predicted on target, and a 95% bootstrap confidence
/// band around that fit.
///
/// `pearson_r` and `sd` are shown in the caption. Returns the path written.
pub fn plot_linear_reg(
    predicted: &[f64],
    target: &[f64],
    pearson_r: f64,
    sd: f64,
    path: &Path,
    options: &PlotOptions,
) -> Result<PathBuf> {
    if predicted.is_empty() || predicted.len() != target.len() {
        return Err(CasfError::invalid(format!(
            "cannot plot {} predictions against {} targets",
            predicted.len(),
            target.len()
        )));
    }
    if predicted.iter().chain(target).any(|v| !v.is_finite()) {
        return Err(CasfError::invalid("plot values must be finite"));
    }
    let (slope, intercept) = linear_fit(target, predicted)
        .ok_or_else(|| CasfError::invalid("target values are constant; no regression line"))?;

    let svg_path = if path.extension().map(|e| e == "png").unwrap_or(false) {
        path.with_extension("svg")
    } else {
        path.to_path_buf()
    };

    let band = confidence_band(target, predicted, CONFIDENCE_LEVEL, BOOTSTRAP_SAMPLES, BOOTSTRAP_SEED);
    debug!("Confidence band over {} grid points", band.len());

    let regression = Regression { slope, intercept, pearson_r, sd, band };
    draw(&svg_path, predicted, target, &regression, options)
        .map_err(|e| CasfError::Plot(e.to_string()))?;

    info!(
        "Regression plot written to {:?} (y = {:.2}x + {:.2})",
        svg_path, slope, intercept
    );
    Ok(svg_path)
}

struct Regression {
    slope: f64,
    intercept: f64,
    pearson_r: f64,
    sd: f64,
    /// `(x, lower, upper)` along the target axis
    band: Vec<(f64, f64, f64)>,
}

/// Pointwise bootstrap band for the least-squares fit of `ys` on `xs`.
///
/// Each of `n_boot` resamples (pairs drawn with replacement) is fitted and
/// evaluated on an even grid spanning `xs`. The band at each grid point is
/// the central `level` interval of those fitted values, with percentiles
/// interpolated linearly. Resamples whose x values are all equal have no fit
/// and are skipped. Returns an empty band when nothing could be fitted.
fn confidence_band(
    xs: &[f64],
    ys: &[f64],
    level: f64,
    n_boot: usize,
    seed: u64,
) -> Vec<(f64, f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Vec::new();
    }

    let (min_x, max_x) = xs[..n]
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));
    let grid: Vec<f64> = (0..BAND_POINTS)
        .map(|i| min_x + (max_x - min_x) * i as f64 / (BAND_POINTS - 1) as f64)
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut fitted: Vec<Vec<f64>> = vec![Vec::with_capacity(n_boot); grid.len()];
    let mut sample_x = vec![0.0; n];
    let mut sample_y = vec![0.0; n];
    for _ in 0..n_boot {
        for j in 0..n {
            let k = rng.gen_range(0..n);
            sample_x[j] = xs[k];
            sample_y[j] = ys[k];
        }
        if let Some((slope, intercept)) = linear_fit(&sample_x, &sample_y) {
            for (values, &x) in fitted.iter_mut().zip(&grid) {
                values.push(slope * x + intercept);
            }
        }
    }

    let tail = (1.0 - level) / 2.0;
    grid.iter()
        .zip(fitted.iter_mut())
        .filter(|(_, values)| !values.is_empty())
        .map(|(&x, values)| {
            values.sort_by(|a, b| a.total_cmp(b));
            (x, percentile(values, tail), percentile(values, 1.0 - tail))
        })
        .collect()
}

/// Linear-interpolated percentile of ascending `sorted`, `q` in [0, 1].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

fn draw(
    path: &Path,
    predicted: &[f64],
    target: &[f64],
    fit: &Regression,
    options: &PlotOptions,
) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (min_t, max_t) = target
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));
    let (lo, hi) = predicted
        .iter()
        .copied()
        .chain(fit.band.iter().flat_map(|&(_, lower, upper)| [lower, upper]))
        .fold((min_t, max_t), |(min, max), v| (min.min(v), max.max(v)));
    let pad = (hi - lo) * 0.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("R = {:.3}, SD = {:.3}", fit.pearson_r, fit.sd),
            ("sans-serif", 32),
        )
        .margin(30)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d((lo - pad)..(hi + pad), (lo - pad)..(hi + pad))?;

    chart
        .configure_mesh()
        .x_desc("Targeted Scores")
        .y_desc("Predicted Scores")
        .draw()?;

    chart
        .draw_series(
            target
                .iter()
                .zip(predicted)
                .map(|(&t, &p)| Circle::new((t, p), 4, BLUE.mix(0.5).filled())),
        )?
        .label("Network output")
        .legend(|(x, y)| Circle::new((x, y), 4, BLUE.filled()));

    if !fit.band.is_empty() {
        let outline: Vec<(f64, f64)> = fit
            .band
            .iter()
            .map(|&(x, lower, _)| (x, lower))
            .chain(fit.band.iter().rev().map(|&(x, _, upper)| (x, upper)))
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(outline, BLUE.mix(0.15).filled())))?
            .label(format!("{:.0}% confidence interval", CONFIDENCE_LEVEL * 100.0))
            .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], BLUE.mix(0.15).filled()));
    }

    chart
        .draw_series(LineSeries::new(
            vec![(min_t, min_t), (max_t, max_t)],
            ORANGE.stroke_width(3),
        ))?
        .label("Ground Truth Linear Regression")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.stroke_width(3)));

    let line_at = |x: f64| fit.slope * x + fit.intercept;
    chart
        .draw_series(LineSeries::new(
            vec![(min_t, line_at(min_t)), (max_t, line_at(max_t))],
            BLUE.stroke_width(3),
        ))?
        .label(format!(
            "Network output, linear Regression, y = {:.2}x + {:.2}",
            fit.slope, fit.intercept
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
