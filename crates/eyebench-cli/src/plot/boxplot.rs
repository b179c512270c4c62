//! Boxplot figure: one panel per series, one box per blur level.
//!
//! Whiskers sit at the 2nd and 98th percentiles and outliers are not drawn;
//! the median is a red line across the box.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use eyebench_core::{Dataset, SeriesBuckets};

use super::{percentile, sigma_label, value_range, PALETTE};

const BOX_HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.15;
// Same width as the histogram figure, double the panel height.
const CANVAS: (u32, u32) = (2480, 17538);

/// Five-number summary of one bucket.
#[derive(Debug, Clone, Copy)]
struct BoxStats {
    whisker_low: f64,
    q1: f64,
    median: f64,
    q3: f64,
    whisker_high: f64,
}

impl BoxStats {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            whisker_low: percentile(&sorted, 2.0),
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
            whisker_high: percentile(&sorted, 98.0),
        })
    }
}

/// Renders the boxplot figure to a PNG at `path`.
///
/// # Errors
///
/// Fails when the backend cannot draw or write the file.
pub fn render_boxplots(dataset: &Dataset, path: &Path) -> Result<()> {
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

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &SeriesBuckets,
    sigmas: &[f64],
) -> Result<()> {
    let (min, max) = value_range(&series.buckets);
    let pad = (max - min) * 0.05;
    let y_range = if series.series.reverse_axis {
        (max + pad)..(min - pad)
    } else {
        (min - pad)..(max + pad)
    };

    let count = series.buckets.len();
    let mut chart = ChartBuilder::on(area)
        .caption(series.series.title, ("sans-serif", 48))
        .margin(24)
        .x_label_area_size(72)
        .y_label_area_size(96)
        .build_cartesian_2d(-0.5..(count as f64 - 0.5), y_range)
        .map_err(|e| anyhow!("failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(count)
        .x_label_formatter(&|x| {
            let i = x.round();
            if (x - i).abs() > 1e-9 || i < 0.0 {
                return String::new();
            }
            sigmas
                .get(i as usize)
                .map_or_else(String::new, |s| sigma_label(*s))
        })
        .label_style(("sans-serif", 28))
        .draw()
        .map_err(|e| anyhow!("failed to draw axes: {e}"))?;

    for (i, bucket) in series.buckets.iter().enumerate() {
        let Some(stats) = BoxStats::from_values(bucket) else {
            continue;
        };
        let x = i as f64;
        let color = PALETTE[i % PALETTE.len()];

        let mut elements: Vec<DynElement<'_, BitMapBackend<'_>, (f64, f64)>> = vec![
            // Filled box with outline.
            Rectangle::new(
                [
                    (x - BOX_HALF_WIDTH, stats.q1),
                    (x + BOX_HALF_WIDTH, stats.q3),
                ],
                color.filled(),
            )
            .into_dyn(),
            Rectangle::new(
                [
                    (x - BOX_HALF_WIDTH, stats.q1),
                    (x + BOX_HALF_WIDTH, stats.q3),
                ],
                BLACK.stroke_width(2),
            )
            .into_dyn(),
            // Whisker stems and caps.
            PathElement::new(
                vec![(x, stats.whisker_low), (x, stats.q1)],
                BLACK.stroke_width(2),
            )
            .into_dyn(),
            PathElement::new(
                vec![(x, stats.q3), (x, stats.whisker_high)],
                BLACK.stroke_width(2),
            )
            .into_dyn(),
            PathElement::new(
                vec![
                    (x - CAP_HALF_WIDTH, stats.whisker_low),
                    (x + CAP_HALF_WIDTH, stats.whisker_low),
                ],
                BLACK.stroke_width(2),
            )
            .into_dyn(),
            PathElement::new(
                vec![
                    (x - CAP_HALF_WIDTH, stats.whisker_high),
                    (x + CAP_HALF_WIDTH, stats.whisker_high),
                ],
                BLACK.stroke_width(2),
            )
            .into_dyn(),
        ];
        elements.push(
            PathElement::new(
                vec![
                    (x - BOX_HALF_WIDTH, stats.median),
                    (x + BOX_HALF_WIDTH, stats.median),
                ],
                RED.stroke_width(3),
            )
            .into_dyn(),
        );

        chart
            .draw_series(elements)
            .map_err(|e| anyhow!("failed to draw box: {e}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_stats_ordered() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let stats = BoxStats::from_values(&values).unwrap();
        assert!(stats.whisker_low <= stats.q1);
        assert!(stats.q1 <= stats.median);
        assert!(stats.median <= stats.q3);
        assert!(stats.q3 <= stats.whisker_high);
        assert!((stats.median - 49.5).abs() < 1e-12);
        // 2nd/98th percentiles, not min/max.
        assert!(stats.whisker_low > 0.0);
        assert!(stats.whisker_high < 99.0);
    }

    #[test]
    fn test_box_stats_unsorted_input() {
        let stats = BoxStats::from_values(&[5.0, 1.0, 3.0]).unwrap();
        assert!((stats.median - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_bucket_has_no_stats() {
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
