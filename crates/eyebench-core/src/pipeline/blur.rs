//! Gaussian blur ladder.

use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;

/// Produces the blur variant for one sigma. Sigma 0 returns the input
/// unchanged; any other sigma applies an isotropic Gaussian blur to the
/// *original* image (variants are independent, not cumulative).
#[must_use]
pub fn blur_variant(image: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        image.clone()
    } else {
        gaussian_blur_f32(image, sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn textured(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = (((x * 13 + y * 7) % 2) * 255) as u8;
            Rgb([v, v, v])
        })
    }

    #[test]
    fn test_sigma_zero_is_pixel_identical() {
        let img = textured(32, 32);
        assert_eq!(blur_variant(&img, 0.0), img);
    }

    #[test]
    fn test_blur_changes_pixels() {
        let img = textured(32, 32);
        assert_ne!(blur_variant(&img, 2.0), img);
    }

    #[test]
    fn test_variants_are_independent() {
        let img = textured(32, 32);
        let direct = blur_variant(&img, 3.0);
        let cumulative = blur_variant(&blur_variant(&img, 3.0), 3.0);
        assert_ne!(direct, cumulative);
    }
}
