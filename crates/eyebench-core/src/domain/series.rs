//! Typed descriptor table for the five plotted series.
//!
//! Replaces an ad hoc list of (title, column index) pairs with accessors
//! bound to `SharpnessRecord` fields, so the reshaper cannot drift out of
//! sync with the column contract.

use super::SharpnessRecord;

/// Descriptor for one plotted series: a display title, an accessor into the
/// record, and whether the axis must be drawn inverted because the metric
/// grows with *blurriness* rather than sharpness.
#[derive(Clone, Copy)]
pub struct MetricSeries {
    /// Panel title.
    pub title: &'static str,
    /// Display convention: true means higher values are blurrier, so the
    /// value axis is drawn descending. Never affects stored values.
    pub reverse_axis: bool,
    extract: fn(&SharpnessRecord) -> f64,
}

impl MetricSeries {
    /// Reads this series' value out of a record.
    #[must_use]
    pub fn value(&self, record: &SharpnessRecord) -> f64 {
        (self.extract)(record)
    }
}

impl std::fmt::Debug for MetricSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricSeries")
            .field("title", &self.title)
            .field("reverse_axis", &self.reverse_axis)
            .finish_non_exhaustive()
    }
}

/// The five plotted series, in panel order: the service's reference score
/// followed by the mean of each local metric. Only the perceptual blur
/// metric is higher-is-blurrier.
#[must_use]
pub fn metric_series() -> [MetricSeries; 5] {
    [
        MetricSeries {
            title: "Reference Sharpness",
            reverse_axis: false,
            extract: |r| r.reference_sharpness,
        },
        MetricSeries {
            title: "Laplacian Variance",
            reverse_axis: false,
            extract: |r| r.vol_mean,
        },
        MetricSeries {
            title: "Perceptual Blur Metric",
            reverse_axis: true,
            extract: |r| r.pbm_mean,
        },
        MetricSeries {
            title: "Tenengrad Variance",
            reverse_axis: false,
            extract: |r| r.tv_mean,
        },
        MetricSeries {
            title: "Wavelet Coefficients Variance",
            reverse_axis: false,
            extract: |r| r.wcv_mean,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pbm_is_reversed() {
        let reversed: Vec<&str> = metric_series()
            .iter()
            .filter(|s| s.reverse_axis)
            .map(|s| s.title)
            .collect();
        assert_eq!(reversed, vec!["Perceptual Blur Metric"]);
    }
}
