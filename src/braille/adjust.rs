//! Brightness, contrast and saturation adjustment.
//!
//! Each color channel goes through three steps in a fixed order:
//!
//! 1. **Brightness** - `v + brightness * 2.55`
//! 2. **Contrast** - `factor * (v - 128) + 128` with
//!    `factor = 259 * (c + 255) / (255 * (259 - c))`, `c = contrast * 2.55`
//! 3. **Saturation** - interpolate away from (or toward) the pixel's luma:
//!    `gray + (v - gray) * (1 + saturation / 100)`
//!
//! Intermediate values are kept as `f64` and only clamped and rounded at
//! the end. Alpha passes through untouched.

use super::luma::luma;
use crate::frame::PixelBuffer;
use crate::params::AdjustmentParams;

/// Slider units to 8-bit channel units.
const SLIDER_TO_CHANNEL: f64 = 2.55;
const MIDPOINT: f64 = 128.0;

/// Precomputed per-call constants.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    brightness_add: f64,
    contrast_factor: f64,
    saturation_factor: f64,
}

impl Coefficients {
    fn from_params(p: &AdjustmentParams) -> Self {
        let c = p.contrast * SLIDER_TO_CHANNEL;
        Self {
            brightness_add: p.brightness * SLIDER_TO_CHANNEL,
            contrast_factor: contrast_factor(c),
            saturation_factor: 1.0 + p.saturation / 100.0,
        }
    }
}

/// Photographic contrast factor for `c` in `[-255, 255]`.
///
/// The denominator `259 - c` stays positive over the whole range.
#[inline]
pub fn contrast_factor(c: f64) -> f64 {
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Clamp to `[0, 255]` and round to the nearest integer.
#[inline]
pub(crate) fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Apply brightness, contrast and saturation to every pixel.
///
/// Returns a new buffer of the same size. With all-zero parameters the
/// output equals the input.
pub fn adjust(src: &PixelBuffer, params: &AdjustmentParams) -> PixelBuffer {
    let k = Coefficients::from_params(params);
    let mut data = Vec::with_capacity(src.data.len());

    for px in src.data.chunks_exact(PixelBuffer::BYTES_PER_PIXEL) {
        let [r, g, b] = adjust_rgb(f64::from(px[0]), f64::from(px[1]), f64::from(px[2]), &k);
        data.extend_from_slice(&[clamp_channel(r), clamp_channel(g), clamp_channel(b), px[3]]);
    }

    PixelBuffer {
        data,
        width: src.width,
        height: src.height,
    }
}

#[inline]
fn adjust_rgb(r: f64, g: f64, b: f64, k: &Coefficients) -> [f64; 3] {
    let contrast = |v: f64| k.contrast_factor * (v + k.brightness_add - MIDPOINT) + MIDPOINT;
    let (r, g, b) = (contrast(r), contrast(g), contrast(b));

    // Gray point is taken after contrast, before clamping.
    let gray = luma(r, g, b);
    let saturate = |v: f64| gray + (v - gray) * k.saturation_factor;
    [saturate(r), saturate(g), saturate(b)]
}
