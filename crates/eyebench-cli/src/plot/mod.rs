//! Figure rendering for the results table.
//!
//! Both figures stack one panel per series: the reference sharpness first,
//! then the four metric means, with a shared warm palette across blur
//! levels. Series flagged as reversed (higher value means blurrier) get a
//! flipped value axis so that "sharper" always points the same way.

mod boxplot;
mod histogram;

pub use boxplot::render_boxplots;
pub use histogram::render_histograms;

use plotters::style::RGBColor;

/// Blur-level palette, cold to hot. Reused modulo its length when the ladder
/// has more than six levels.
pub(crate) const PALETTE: [RGBColor; 6] = [
    RGBColor(255, 235, 205), // blanchedalmond
    RGBColor(255, 215, 0),   // gold
    RGBColor(255, 165, 0),   // orange
    RGBColor(255, 99, 71),   // tomato
    RGBColor(178, 34, 34),   // firebrick
    RGBColor(128, 0, 0),     // maroon
];

/// Smallest interval covering every value in every bucket, padded so a
/// degenerate single-value range still has width.
pub(crate) fn value_range(buckets: &[Vec<f64>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in buckets.iter().flatten().copied() {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// Linearly interpolated percentile of a sorted slice, `p` in 0..=100.
pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Legend label for one blur level.
pub(crate) fn sigma_label(sigma: f64) -> String {
    format!("sigma = {sigma}")
}
