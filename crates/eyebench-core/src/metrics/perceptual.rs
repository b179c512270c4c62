//! No-reference perceptual blur metric (Crete et al.).
//!
//! Re-blurs the patch with a strong 1-D mean filter along each axis and
//! measures how much gradient energy the re-blur removes: a sharp patch
//! loses a lot, an already-blurry one loses almost nothing. The score is
//! normalized to 0..1 where higher = blurrier, so this is the one metric
//! plotted with a reversed axis.

use super::{reflect_edge, GrayPatch};

/// 1-D mean filter size used for the re-blur.
const NEIGHBORHOOD: usize = 11;

#[derive(Clone)]
struct Grid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Grid {
    fn from_patch(patch: &GrayPatch) -> Self {
        Self {
            width: patch.width(),
            height: patch.height(),
            data: patch.to_f64().iter().map(|v| v / 255.0).collect(),
        }
    }

    fn get_reflect(&self, x: i64, y: i64) -> f64 {
        let x = reflect_edge(x, self.width);
        let y = reflect_edge(y, self.height);
        self.data[y * self.width + x]
    }

    /// Mean filter of size `NEIGHBORHOOD` along one axis, reflected borders.
    fn uniform1d(&self, horizontal: bool) -> Self {
        let half = (NEIGHBORHOOD / 2) as i64;
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let mut acc = 0.0;
                for k in -half..=half {
                    acc += if horizontal {
                        self.get_reflect(x + k, y)
                    } else {
                        self.get_reflect(x, y + k)
                    };
                }
                #[allow(clippy::cast_precision_loss)]
                data.push(acc / NEIGHBORHOOD as f64);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Absolute Sobel derivative along one axis (derivative taps -1,0,1 on
    /// the axis, smoothing taps 1,2,1 across it).
    fn abs_sobel(&self, horizontal: bool) -> Self {
        let kernel: [[f64; 3]; 3] = if horizontal {
            [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]
        } else {
            [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]
        };
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let mut acc = 0.0;
                for (ky, row) in kernel.iter().enumerate() {
                    for (kx, &k) in row.iter().enumerate() {
                        acc += k * self.get_reflect(x + kx as i64 - 1, y + ky as i64 - 1);
                    }
                }
                data.push(acc.abs());
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Sums `f(index)` over the interior region, skipping a 2-pixel
    /// top/left margin and a 1-pixel bottom/right margin.
    fn trimmed_sum(&self, f: impl Fn(usize) -> f64) -> f64 {
        let mut acc = 0.0;
        for y in 2..self.height.saturating_sub(1) {
            for x in 2..self.width.saturating_sub(1) {
                acc += f(y * self.width + x);
            }
        }
        acc
    }
}

/// Blur estimate along one axis, or `None` when the axis carries no
/// gradient energy and therefore no blur evidence either way.
fn axis_blur(grid: &Grid, horizontal: bool) -> Option<f64> {
    let blurred = grid.uniform1d(horizontal);
    let grad_sharp = grid.abs_sobel(horizontal);
    let grad_blur = blurred.abs_sobel(horizontal);

    let total = grad_sharp.trimmed_sum(|i| grad_sharp.data[i]);
    let lost = grad_sharp.trimmed_sum(|i| (grad_sharp.data[i] - grad_blur.data[i]).max(0.0));

    if total <= f64::EPSILON {
        return None;
    }
    Some(((total - lost) / total).abs())
}

/// Perceptual blur score in 0..1, higher = blurrier.
#[must_use]
pub fn perceptual_blur_metric(patch: &GrayPatch) -> f64 {
    if patch.width() < 4 || patch.height() < 4 {
        return 0.0;
    }
    let grid = Grid::from_patch(patch);
    match (axis_blur(&grid, true), axis_blur(&grid, false)) {
        (Some(h), Some(v)) => h.max(v),
        // A one-dimensional texture is judged on its only textured axis.
        (Some(b), None) | (None, Some(b)) => b,
        // Gradient-free everywhere: nothing left to lose to a re-blur.
        (None, None) => 1.0,
    }
}
