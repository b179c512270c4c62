//! The collection pipeline: one row per (image, blur level).
//!
//! Entirely single-threaded and sequential; the detection call dominates the
//! cost and is made once per blur variant.

mod blur;
mod preprocess;
mod region;

pub use blur::blur_variant;
pub use preprocess::downscale;
pub use region::eye_patch;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::{debug, info, warn};

use crate::domain::{CollectConfig, EyePair, FailureMode, SharpnessRecord};
use crate::metrics::{
    perceptual_blur_metric, timed_pair, tenengrad_variance, variance_of_laplacian,
    wavelet_coefficients_variance,
};
use crate::ports::{
    DescribeError, FaceDescriber, ImageSource, ProgressEvent, ProgressSink, RecordSink,
};

/// Totals for one collection run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectStats {
    /// Images whose full blur ladder succeeded and was committed.
    pub committed: usize,
    /// Images discarded without writing any rows.
    pub skipped: usize,
}

/// Why the current image has to be discarded.
enum ImageAbort {
    Describe(DescribeError),
    MissingEyes,
}

impl ImageAbort {
    fn reason(&self) -> String {
        match self {
            Self::Describe(e) => e.to_string(),
            Self::MissingEyes => String::from("face description carries no eye landmarks"),
        }
    }
}

/// Runs the collector over every image from `source`.
///
/// Per image: downscale once, then for each sigma blur, encode, ask the
/// detection service, crop both eyes and evaluate the four metrics. Rows are
/// buffered and committed all-or-nothing; a detection failure at any blur
/// level discards the whole image.
///
/// # Errors
///
/// Returns an error when the sink fails, or on a service failure while
/// `on_service_error` is `AbortBatch`.
pub fn collect(
    source: &dyn ImageSource,
    describer: &dyn FaceDescriber,
    sink: &dyn RecordSink,
    progress: &dyn ProgressSink,
    config: &CollectConfig,
) -> Result<CollectStats> {
    let total = source.count_hint();
    let mut stats = CollectStats::default();

    for (index, loaded) in source.images().enumerate() {
        let loaded = match loaded {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    name: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                stats.skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            name: loaded.name.clone(),
            index,
            total,
        });

        match collect_image(&loaded.name, &loaded.image, describer, config) {
            Ok(records) => {
                sink.commit(&records)
                    .with_context(|| format!("failed to write rows for {}", loaded.name))?;
                progress.on_event(ProgressEvent::Committed {
                    name: loaded.name,
                    rows: records.len(),
                });
                stats.committed += 1;
            }
            Err(ImageAbort::Describe(DescribeError::Service(e)))
                if config.on_service_error == FailureMode::AbortBatch =>
            {
                return Err(e.context(format!("detection service failed on {}", loaded.name)));
            }
            Err(abort) => {
                progress.on_event(ProgressEvent::Skipped {
                    name: loaded.name,
                    reason: abort.reason(),
                });
                stats.skipped += 1;
            }
        }
    }

    sink.flush()?;
    progress.on_event(ProgressEvent::Finished {
        committed: stats.committed,
        skipped: stats.skipped,
    });
    info!(
        "collection finished: {} committed, {} skipped",
        stats.committed, stats.skipped
    );
    Ok(stats)
}

/// Processes the full blur ladder for one image, returning a complete row
/// set or the reason the image must be discarded.
fn collect_image(
    name: &str,
    image: &image::DynamicImage,
    describer: &dyn FaceDescriber,
    config: &CollectConfig,
) -> std::result::Result<Vec<SharpnessRecord>, ImageAbort> {
    let base = downscale(image, config.long_edge);
    debug!("{name}: downscaled to {}x{}", base.width(), base.height());

    // Eye coordinates come from the first successful variant and are reused
    // for the rest of the ladder; the service is not asked again.
    let mut eyes: Option<EyePair> = None;
    let mut records = Vec::with_capacity(config.sigmas.len());

    for &sigma in &config.sigmas {
        let variant = blur_variant(&base, sigma);
        let bytes = match encode_jpeg(&variant, config.jpeg_quality) {
            Ok(b) => b,
            Err(e) => return Err(ImageAbort::Describe(DescribeError::Service(e))),
        };

        let face = match describer.describe(&bytes) {
            Ok(face) => face,
            Err(e) => {
                warn!("{name}: detection failed at sigma {sigma}: {e}");
                return Err(ImageAbort::Describe(e));
            }
        };

        let pair = match eyes {
            Some(pair) => pair,
            None => {
                let pair = EyePair::from_description(&face, base.width(), base.height())
                    .ok_or(ImageAbort::MissingEyes)?;
                eyes = Some(pair);
                pair
            }
        };

        records.push(measure_variant(
            name,
            &variant,
            sigma,
            face.sharpness,
            pair,
            config.eye_radius,
        ));
    }

    Ok(records)
}

/// Crops both eye patches from one blur variant and evaluates the metric
/// suite, timed per metric across the left+right pair.
fn measure_variant(
    name: &str,
    variant: &RgbImage,
    sigma: f32,
    reference_sharpness: f64,
    eyes: EyePair,
    radius: u32,
) -> SharpnessRecord {
    let left = eye_patch(variant, eyes.left, radius);
    let right = eye_patch(variant, eyes.right, radius);

    let vol = timed_pair(&left, &right, variance_of_laplacian);
    let pbm = timed_pair(&left, &right, perceptual_blur_metric);
    let tv = timed_pair(&left, &right, tenengrad_variance);
    let wcv = timed_pair(&left, &right, wavelet_coefficients_variance);

    SharpnessRecord {
        file: name.to_owned(),
        blur_std_dev: f64::from(sigma),
        reference_sharpness,
        vol_left: vol.left,
        vol_right: vol.right,
        vol_mean: vol.mean(),
        vol_time: vol.seconds,
        pbm_left: pbm.left,
        pbm_right: pbm.right,
        pbm_mean: pbm.mean(),
        pbm_time: pbm.seconds,
        tv_left: tv.left,
        tv_right: tv.right,
        tv_mean: tv.mean(),
        tv_time: tv.seconds,
        wcv_left: wcv.left,
        wcv_right: wcv.right,
        wcv_mean: wcv.mean(),
        wcv_time: wcv.seconds,
    }
}

/// Encodes a variant as JPEG, the transport format the detection service
/// expects.
fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    image
        .write_with_encoder(encoder)
        .context("failed to encode blur variant as JPEG")?;
    Ok(bytes)
}
