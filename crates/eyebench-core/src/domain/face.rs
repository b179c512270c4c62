//! Face description types returned by the detection service.

use serde::{Deserialize, Serialize};

/// A named facial keypoint with normalized (0..1) image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Which keypoint this is.
    pub kind: LandmarkKind,
    /// Horizontal position as a fraction of image width.
    pub x: f64,
    /// Vertical position as a fraction of image height.
    pub y: f64,
}

/// The kind of facial landmark.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkKind {
    /// Left eye center (subject's left).
    EyeLeft,
    /// Right eye center (subject's right).
    EyeRight,
    /// Any landmark the pipeline does not use.
    Other,
}

/// Result of a successful single-face detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceDescription {
    /// The service's own sharpness quality score, treated as ground truth.
    pub sharpness: f64,
    /// Named keypoints with normalized coordinates.
    pub landmarks: Vec<Landmark>,
}

impl FaceDescription {
    /// Returns the landmark of the given kind, if present.
    #[must_use]
    pub fn landmark(&self, kind: LandmarkKind) -> Option<Landmark> {
        self.landmarks.iter().copied().find(|l| l.kind == kind)
    }
}

/// Denormalized eye centers in pixel coordinates.
///
/// Computed once from the first successful blur variant and reused for every
/// later variant of the same image; the service is not asked to re-localize
/// landmarks per blur level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyePair {
    /// Left eye center (x, y) in pixels.
    pub left: (i64, i64),
    /// Right eye center (x, y) in pixels.
    pub right: (i64, i64),
}

impl EyePair {
    /// Denormalizes the eye landmarks of a face description against the
    /// image dimensions. Returns `None` when either eye landmark is missing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_description(face: &FaceDescription, width: u32, height: u32) -> Option<Self> {
        let denorm = |l: Landmark| {
            (
                (f64::from(width) * l.x) as i64,
                (f64::from(height) * l.y) as i64,
            )
        };
        let left = face.landmark(LandmarkKind::EyeLeft).map(denorm)?;
        let right = face.landmark(LandmarkKind::EyeRight).map(denorm)?;
        Some(Self { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> FaceDescription {
        FaceDescription {
            sharpness: 80.0,
            landmarks: vec![
                Landmark {
                    kind: LandmarkKind::EyeLeft,
                    x: 0.25,
                    y: 0.5,
                },
                Landmark {
                    kind: LandmarkKind::EyeRight,
                    x: 0.75,
                    y: 0.5,
                },
                Landmark {
                    kind: LandmarkKind::Other,
                    x: 0.5,
                    y: 0.8,
                },
            ],
        }
    }

    #[test]
    fn test_denormalize_eye_pair() {
        let eyes = EyePair::from_description(&description(), 400, 200).unwrap();
        assert_eq!(eyes.left, (100, 100));
        assert_eq!(eyes.right, (300, 100));
    }

    #[test]
    fn test_missing_eye_landmark() {
        let face = FaceDescription {
            sharpness: 10.0,
            landmarks: vec![Landmark {
                kind: LandmarkKind::EyeLeft,
                x: 0.5,
                y: 0.5,
            }],
        };
        assert!(EyePair::from_description(&face, 100, 100).is_none());
    }
}
