//! Variance of the Laplacian.
//!
//! The classic focus measure: a discrete Laplacian highlights rapid
//! intensity change, and sharp images carry more of it. Higher = sharper.
//! Borders reflect without repeating the edge sample.

use super::{filter3x3, reflect_101, variance, GrayPatch};

const LAPLACIAN: [[f64; 3]; 3] = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Variance of the 3x3 Laplacian response over the patch.
#[must_use]
pub fn variance_of_laplacian(patch: &GrayPatch) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    variance(&filter3x3(patch, &LAPLACIAN, reflect_101))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_patch_has_zero_variance() {
        let patch = GrayPatch::from_fn(16, 16, |_, _| 128);
        assert!((variance_of_laplacian(&patch) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_checkerboard_sharper_than_gradient() {
        let checker = GrayPatch::from_fn(32, 32, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 });
        let gradient = GrayPatch::from_fn(32, 32, |x, _| (x * 8) as u8);
        assert!(variance_of_laplacian(&checker) > variance_of_laplacian(&gradient));
    }

    #[test]
    fn test_deterministic() {
        let patch = GrayPatch::from_fn(24, 24, |x, y| ((x * 7 + y * 13) % 256) as u8);
        assert!(
            (variance_of_laplacian(&patch) - variance_of_laplacian(&patch)).abs() < f64::EPSILON
        );
    }
}
