//! Proportional downscale to a fixed long-edge size.

use image::imageops::FilterType;
use image::RgbImage;

/// Resizes so the longer dimension equals `long_edge` and the shorter one is
/// scaled proportionally, using linear interpolation. The short edge is
/// integer-truncated, so downstream consumers must tolerate a +/- 1 px
/// aspect deviation.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn downscale(image: &image::DynamicImage, long_edge: u32) -> RgbImage {
    let (w, h) = (image.width(), image.height());
    let (new_w, new_h) = if h >= w {
        let ratio = f64::from(h) / f64::from(w);
        ((f64::from(long_edge) / ratio) as u32, long_edge)
    } else {
        let ratio = f64::from(w) / f64::from(h);
        (long_edge, (f64::from(long_edge) / ratio) as u32)
    };
    image
        .resize_exact(new_w.max(1), new_h.max(1), FilterType::Triangle)
        .to_rgb8()
}
