//! Synthetic test images and canned face descriptions.

use eyebench_core::{FaceDescription, Landmark, LandmarkKind};
use image::{DynamicImage, Rgb, RgbImage};

/// Normalized coordinates of the synthetic left eye.
pub const EYE_LEFT_NORM: (f64, f64) = (0.35, 0.4);
/// Normalized coordinates of the synthetic right eye.
pub const EYE_RIGHT_NORM: (f64, f64) = (0.65, 0.4);

/// A heavily textured image standing in for a portrait.
///
/// Deterministic high-frequency noise, so Gaussian blur measurably reduces
/// every sharpness metric and repeated builds are identical.
#[must_use]
pub fn textured_portrait(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        // Small LCG keyed on the coordinates; no external RNG needed.
        let seed = u64::from(x).wrapping_mul(6_364_136_223_846_793_005)
            ^ u64::from(y).wrapping_mul(1_442_695_040_888_963_407);
        let v = (seed.wrapping_mul(2_862_933_555_777_941_757) >> 56) as u8;
        Rgb([v, v.wrapping_add(64), v.wrapping_mul(3)])
    });
    DynamicImage::ImageRgb8(img)
}

/// A face description with the synthetic eye positions and a given
/// reference sharpness.
#[must_use]
pub fn fixed_face(sharpness: f64) -> FaceDescription {
    FaceDescription {
        sharpness,
        landmarks: vec![
            Landmark {
                kind: LandmarkKind::EyeLeft,
                x: EYE_LEFT_NORM.0,
                y: EYE_LEFT_NORM.1,
            },
            Landmark {
                kind: LandmarkKind::EyeRight,
                x: EYE_RIGHT_NORM.0,
                y: EYE_RIGHT_NORM.1,
            },
            Landmark {
                kind: LandmarkKind::Other,
                x: 0.5,
                y: 0.7,
            },
        ],
    }
}
