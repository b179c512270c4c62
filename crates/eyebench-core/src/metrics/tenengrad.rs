//! Tenengrad variance.
//!
//! Horizontal and vertical 3x3 Sobel gradients with reflected borders;
//! the score is the variance of the per-pixel gradient magnitude.
//! Higher = sharper.

use super::{filter3x3, reflect_edge, variance, GrayPatch};

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Variance of sqrt(gx^2 + gy^2) over the patch.
#[must_use]
pub fn tenengrad_variance(patch: &GrayPatch) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    let gx = filter3x3(patch, &SOBEL_X, reflect_edge);
    let gy = filter3x3(patch, &SOBEL_Y, reflect_edge);
    let magnitudes: Vec<f64> = gx
        .iter()
        .zip(&gy)
        .map(|(x, y)| x.hypot(*y))
        .collect();
    variance(&magnitudes)
}
