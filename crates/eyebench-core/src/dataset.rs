//! Reshapes committed rows into per-blur-level buckets for plotting.

use anyhow::{bail, Result};

use crate::domain::{metric_series, MetricSeries, SharpnessRecord, EXPECTED_HEADER};

/// One plotted series with its values grouped by blur level.
#[derive(Debug)]
pub struct SeriesBuckets {
    /// Descriptor (title, axis direction).
    pub series: MetricSeries,
    /// `buckets[i]` holds one value per committed image for blur level `i`.
    pub buckets: Vec<Vec<f64>>,
}

/// The five plotted series bucketed by blur level.
#[derive(Debug)]
pub struct Dataset {
    /// Number of blur levels per image.
    pub sigma_count: usize,
    /// Blur sigma of each bucket, taken from the first image's ladder and
    /// used for legend and tick labels.
    pub sigmas: Vec<f64>,
    /// Series in panel order.
    pub series: Vec<SeriesBuckets>,
}

impl Dataset {
    /// Buckets rows by `row_index mod sigma_count`.
    ///
    /// This relies on the writer's round-robin invariant: each committed
    /// image contributes exactly `sigma_count` consecutive rows in fixed
    /// blur order. A table violating that (for example a hand-edited file
    /// with a partial image) reshapes without complaint into silently wrong
    /// buckets - the row count check below is the only guard.
    ///
    /// # Errors
    ///
    /// Fails when `sigma_count` is zero or the row count is not a multiple
    /// of it.
    pub fn from_records(records: &[SharpnessRecord], sigma_count: usize) -> Result<Self> {
        if sigma_count == 0 {
            bail!("sigma count must be positive");
        }
        if records.len() % sigma_count != 0 {
            bail!(
                "row count {} is not a multiple of the blur-level count {sigma_count}; \
                 the table was not produced by an all-or-nothing writer",
                records.len()
            );
        }

        let series = metric_series()
            .into_iter()
            .map(|series| {
                let mut buckets = vec![Vec::with_capacity(records.len() / sigma_count); sigma_count];
                for (i, record) in records.iter().enumerate() {
                    buckets[i % sigma_count].push(series.value(record));
                }
                SeriesBuckets { series, buckets }
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let sigmas = if records.is_empty() {
            (0..sigma_count).map(|i| i as f64).collect()
        } else {
            records
                .iter()
                .take(sigma_count)
                .map(|r| r.blur_std_dev)
                .collect()
        };

        Ok(Self {
            sigma_count,
            sigmas,
            series,
        })
    }

    /// Number of committed images represented in the dataset.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.series
            .first()
            .and_then(|s| s.buckets.first())
            .map_or(0, Vec::len)
    }
}

/// Validates a CSV header against the fixed column contract.
///
/// # Errors
///
/// Fails when the header deviates in length, order or spelling.
pub fn validate_header(header: &[String]) -> Result<()> {
    if header.len() != EXPECTED_HEADER.len() {
        bail!(
            "expected {} columns, found {}",
            EXPECTED_HEADER.len(),
            header.len()
        );
    }
    for (found, expected) in header.iter().zip(EXPECTED_HEADER) {
        if found != expected {
            bail!("unexpected column {found:?}, expected {expected:?}");
        }
    }
    Ok(())
}
