//! Collection pipeline configuration.

/// What to do with the rest of the batch when the detection service itself
/// fails (network, auth, quota) - as opposed to a clean "no single face"
/// answer, which always just discards the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Discard the current image and continue with the next one.
    #[default]
    SkipImage,
    /// Abort the whole batch with an error.
    AbortBatch,
}

/// Parameters of one collection run.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Target long-edge length for the proportional downscale, in pixels.
    pub long_edge: u32,
    /// Half the side of the square eye crop, in pixels.
    pub eye_radius: u32,
    /// Ordered Gaussian blur standard deviations, 0 meaning "no blur".
    pub sigmas: Vec<f32>,
    /// JPEG quality used when encoding variants for the detection service.
    pub jpeg_quality: u8,
    /// Batch behavior on service failure.
    pub on_service_error: FailureMode,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            long_edge: 1200,
            eye_radius: 48,
            sigmas: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            jpeg_quality: 90,
            on_service_error: FailureMode::SkipImage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectConfig::default();
        assert_eq!(config.long_edge, 1200);
        assert_eq!(config.eye_radius, 48);
        assert_eq!(config.sigmas.len(), 6);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.on_service_error, FailureMode::SkipImage);
    }
}
