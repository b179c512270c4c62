//! Stacked histogram figure: one panel per series, one color per blur level.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use eyebench_core::{Dataset, SeriesBuckets};

use super::{sigma_label, value_range, PALETTE};

const BINS: usize = 50;
// A4 width at 300 dpi, panels stacked vertically.
const CANVAS: (u32, u32) = (2480, 8769);

/// Renders the stacked-histogram figure to a PNG at `path`.
///
/// # Errors
///
/// Fails when the backend cannot draw or write the file.
pub fn render_histograms(dataset: &Dataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("failed to clear canvas: {e}"))?;

    let panels = root.split_evenly((dataset.series.len(), 1));
    for (panel, series) in panels.iter().zip(&dataset.series) {
        draw_panel(panel, series, &dataset.sigmas)?;
    }

    root.present()
        .map_err(|e| anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(())
}

/// Per-bin counts for each blur level, over a common bin grid.
fn bin_counts(series: &SeriesBuckets, min: f64, max: f64) -> Vec<Vec<f64>> {
    let width = max - min;
    series
        .buckets
        .iter()
        .map(|bucket| {
            let mut counts = vec![0.0; BINS];
            for &value in bucket {
                let bin = (((value - min) / width) * BINS as f64) as usize;
                counts[bin.min(BINS - 1)] += 1.0;
            }
            counts
        })
        .collect()
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &SeriesBuckets,
    sigmas: &[f64],
) -> Result<()> {
    let (min, max) = value_range(&series.buckets);
    let counts = bin_counts(series, min, max);

    // Tallest stacked bar sets the count axis.
    let y_max = (0..BINS)
        .map(|bin| counts.iter().map(|c| c[bin]).sum::<f64>())
        .fold(1.0_f64, f64::max);

    // A reversed series gets a flipped value axis so sharper is always on
    // the same side.
    let x_range = if series.series.reverse_axis {
        max..min
    } else {
        min..max
    };

    let mut chart = ChartBuilder::on(area)
        .caption(series.series.title, ("sans-serif", 48))
        .margin(24)
        .x_label_area_size(72)
        .y_label_area_size(96)
        .build_cartesian_2d(x_range, 0.0..y_max * 1.05)
        .map_err(|e| anyhow!("failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc("Count")
        .label_style(("sans-serif", 28))
        .draw()
        .map_err(|e| anyhow!("failed to draw axes: {e}"))?;

    let bin_width = (max - min) / BINS as f64;
    let mut base = vec![0.0; BINS];

    for (i, level) in counts.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let bars: Vec<_> = level
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0.0)
            .map(|(bin, &count)| {
                let x0 = min + bin as f64 * bin_width;
                let x1 = x0 + bin_width;
                Rectangle::new([(x0, base[bin]), (x1, base[bin] + count)], color.filled())
            })
            .collect();
        for (bin, &count) in level.iter().enumerate() {
            base[bin] += count;
        }

        let label = sigma_label(sigmas.get(i).copied().unwrap_or(i as f64));
        chart
            .draw_series(bars)
            .map_err(|e| anyhow!("failed to draw bars: {e}"))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 16, y + 8)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 28))
        .draw()
        .map_err(|e| anyhow!("failed to draw legend: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyebench_core::SharpnessRecord;

    fn record(sigma: f64, value: f64) -> SharpnessRecord {
        SharpnessRecord {
            file: String::from("x.jpg"),
            blur_std_dev: sigma,
            reference_sharpness: value,
            vol_left: value,
            vol_right: value,
            vol_mean: value,
            vol_time: 0.0,
            pbm_left: value,
            pbm_right: value,
            pbm_mean: value,
            pbm_time: 0.0,
            tv_left: value,
            tv_right: value,
            tv_mean: value,
            tv_time: 0.0,
            wcv_left: value,
            wcv_right: value,
            wcv_mean: value,
            wcv_time: 0.0,
        }
    }

    #[test]
    fn test_bin_counts_total_matches_bucket_sizes() {
        let records: Vec<_> = (0..10)
            .flat_map(|img| (0..2).map(move |s| record(s as f64, (img * s) as f64)))
            .collect();
        let dataset = Dataset::from_records(&records, 2).unwrap();
        let series = &dataset.series[0];

        let (min, max) = value_range(&series.buckets);
        let counts = bin_counts(series, min, max);
        assert_eq!(counts.len(), 2);
        for (level, bucket) in counts.iter().zip(&series.buckets) {
            let total: f64 = level.iter().sum();
            assert!((total - bucket.len() as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let records: Vec<_> = (0..4).map(|v| record(0.0, f64::from(v))).collect();
        let dataset = Dataset::from_records(&records, 1).unwrap();
        let series = &dataset.series[0];

        let (min, max) = value_range(&series.buckets);
        let counts = bin_counts(series, min, max);
        assert!((counts[0][BINS - 1] - 1.0).abs() < 1e-12);
    }
}
