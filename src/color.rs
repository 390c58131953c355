//! Colors and their conversion to 8-bit samples.

use glam::DVec3;
use image::Rgb;

/// RGB color with linear channels nominally in [0, 1].
pub type Color = DVec3;

/// Light-blue color returned for rays that hit nothing.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.2, 0.3, 0.5);

/// Convert a single channel to an 8-bit sample.
///
/// Channels are clamped to [0, 1] before scaling by 255.999, so 1.0 lands on
/// 255 and out-of-range values saturate instead of wrapping.
#[inline]
pub fn quantize(channel: f64) -> u8 {
    // NaN survives clamp; the saturating cast maps it to 0.
    (255.999 * channel.clamp(0.0, 1.0)) as u8
}

/// Quantize all three channels of a color.
#[inline]
pub fn to_rgb8(color: Color) -> Rgb<u8> {
    Rgb([quantize(color.x), quantize(color.y), quantize(color.z)])
}
