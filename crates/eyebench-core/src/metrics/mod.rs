//! The four sharpness metrics computed over single-channel eye patches.
//!
//! All four are pure functions: the same patch always yields the same
//! scalar. Borders are handled by reflection throughout.

mod laplacian;
mod perceptual;
mod tenengrad;
mod wavelet;

pub use laplacian::variance_of_laplacian;
pub use perceptual::perceptual_blur_metric;
pub use tenengrad::tenengrad_variance;
pub use wavelet::wavelet_coefficients_variance;

use std::time::Instant;

use crate::domain::MetricSample;

/// A single-channel 8-bit patch, typically one eye region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPatch {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayPatch {
    /// Creates a patch from row-major pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`.
    #[must_use]
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), width * height, "patch data length mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// Creates a patch by evaluating `f(x, y)` for every pixel.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel value at (x, y) as f64, with edge-repeating reflection for
    /// out-of-range coordinates.
    #[must_use]
    pub(crate) fn get_reflect(&self, x: i64, y: i64) -> f64 {
        let x = reflect_edge(x, self.width);
        let y = reflect_edge(y, self.height);
        f64::from(self.data[y * self.width + x])
    }

    /// Row-major pixel values as f64.
    #[must_use]
    pub(crate) fn to_f64(&self) -> Vec<f64> {
        self.data.iter().map(|&v| f64::from(v)).collect()
    }
}

/// Reflects an out-of-range index back into `0..n`, repeating the edge
/// sample: for n=4 the pattern is `dcba|abcd|dcba`.
pub(crate) fn reflect_edge(mut i: i64, n: usize) -> usize {
    assert!(n > 0, "cannot reflect into an empty axis");
    let n = n as i64;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - 1 - i;
        } else {
            #[allow(clippy::cast_sign_loss)]
            return i as usize;
        }
    }
}

/// Reflects an out-of-range index back into `0..n` without repeating the
/// edge sample: for n=4 the pattern is `dcb|abcd|cba`.
pub(crate) fn reflect_101(mut i: i64, n: usize) -> usize {
    assert!(n > 0, "cannot reflect into an empty axis");
    if n == 1 {
        return 0;
    }
    let n = n as i64;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            #[allow(clippy::cast_sign_loss)]
            return i as usize;
        }
    }
}

/// Applies a 3x3 filter, resolving out-of-range coordinates through the
/// given border reflection.
pub(crate) fn filter3x3(
    patch: &GrayPatch,
    kernel: &[[f64; 3]; 3],
    border: fn(i64, usize) -> usize,
) -> Vec<f64> {
    let mut out = Vec::with_capacity(patch.width * patch.height);
    for y in 0..patch.height as i64 {
        for x in 0..patch.width as i64 {
            let mut acc = 0.0;
            for (ky, row) in kernel.iter().enumerate() {
                for (kx, &k) in row.iter().enumerate() {
                    let sx = border(x + kx as i64 - 1, patch.width);
                    let sy = border(y + ky as i64 - 1, patch.height);
                    acc += k * f64::from(patch.data[sy * patch.width + sx]);
                }
            }
            out.push(acc);
        }
    }
    out
}

/// Population variance.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Runs a metric over the left and right eye patches, timing the combined
/// evaluation.
#[must_use]
pub fn timed_pair(
    left: &GrayPatch,
    right: &GrayPatch,
    metric: impl Fn(&GrayPatch) -> f64,
) -> MetricSample {
    let start = Instant::now();
    let left = metric(left);
    let right = metric(right);
    let seconds = start.elapsed().as_secs_f64();
    MetricSample {
        left,
        right,
        seconds,
    }
}
