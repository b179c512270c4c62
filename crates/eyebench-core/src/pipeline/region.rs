//! Eye region extraction.

use image::RgbImage;
use tracing::warn;

use crate::metrics::GrayPatch;

/// Index of the color channel used for metric computation. The green
/// channel carries the most luminance information in an RGB image.
const METRIC_CHANNEL: usize = 1;

/// Extracts a square patch of side 2*radius centered on `center` from the
/// metric channel.
///
/// Near image borders the crop is clamped to the image bounds and shrinks;
/// callers get a smaller patch rather than padding or an error.
#[must_use]
pub fn eye_patch(image: &RgbImage, center: (i64, i64), radius: u32) -> GrayPatch {
    let (cx, cy) = center;
    let r = i64::from(radius);
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));

    let x0 = (cx - r).clamp(0, w);
    let x1 = (cx + r).clamp(0, w);
    let y0 = (cy - r).clamp(0, h);
    let y1 = (cy + r).clamp(0, h);

    if x1 - x0 != 2 * r || y1 - y0 != 2 * r {
        warn!(
            "eye region at ({cx}, {cy}) clipped to {}x{} by the image border",
            x1 - x0,
            y1 - y0
        );
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    GrayPatch::from_fn((x1 - x0) as usize, (y1 - y0) as usize, |x, y| {
        image.get_pixel((x0 + x as i64) as u32, (y0 + y as i64) as u32).0[METRIC_CHANNEL]
    })
}
