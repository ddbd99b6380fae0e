//! Parameter sets threaded through the render pipeline.
//!
//! The core trusts these values. Callers run [`AdjustmentParams::validate`]
//! and [`GlyphGridRequest::validate`] before handing them to
//! [`crate::pipeline::render`].

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed range for brightness, contrast and saturation.
pub const ADJUST_RANGE: RangeInclusive<f64> = -100.0..=100.0;
/// Allowed range for sharpness.
pub const SHARPNESS_RANGE: RangeInclusive<f64> = 0.0..=5.0;
/// Default upper bound for output grid width and height, in characters.
pub const DEFAULT_MAX_CHARS: u32 = 400;
/// Hard ceiling for `max_chars`, keeping dot-grid sizes well inside `u32`.
pub const MAX_CHARS_LIMIT: u32 = 4096;
/// Default grid width used by the command line.
pub const DEFAULT_CHARS_W: u32 = 80;
/// Default grid height used by the command line.
pub const DEFAULT_CHARS_H: u32 = 30;
/// Default luma threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Out-of-range parameter detected by caller-side validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },
}

/// Color and sharpening adjustments.
///
/// All-zero values leave the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Additive luminance shift, `[-100, 100]`
    pub brightness: f64,
    /// Contrast curve around the midpoint 128, `[-100, 100]`
    pub contrast: f64,
    /// Chroma scaling relative to luma, `[-100, 100]`
    pub saturation: f64,
    /// Unsharp convolution strength, `[0, 5]`
    pub sharpness: f64,
}

impl AdjustmentParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_range("brightness", self.brightness, ADJUST_RANGE)?;
        check_range("contrast", self.contrast, ADJUST_RANGE)?;
        check_range("saturation", self.saturation, ADJUST_RANGE)?;
        check_range("sharpness", self.sharpness, SHARPNESS_RANGE)
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    range: RangeInclusive<f64>,
) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name });
    }
    if !range.contains(&value) {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

/// Requested output grid and thresholding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphGridRequest {
    /// Output width in characters
    pub chars_w: u32,
    /// Output height in characters (ignored when `keep_aspect` is set)
    pub chars_h: u32,
    /// Luma cut point for dot activation
    pub threshold: u8,
    /// Flip dot polarity (dark pixels become dots)
    pub invert: bool,
    /// Derive `chars_h` from `chars_w` and the source aspect ratio
    pub keep_aspect: bool,
    /// Upper bound for both grid dimensions
    pub max_chars: u32,
}

impl Default for GlyphGridRequest {
    fn default() -> Self {
        Self {
            chars_w: DEFAULT_CHARS_W,
            chars_h: DEFAULT_CHARS_H,
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            keep_aspect: false,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl GlyphGridRequest {
    /// Request for a `chars_w x chars_h` grid with default threshold options.
    pub fn new(chars_w: u32, chars_h: u32) -> Self {
        Self {
            chars_w,
            chars_h,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        check_range(
            "max_chars",
            f64::from(self.max_chars),
            1.0..=f64::from(MAX_CHARS_LIMIT),
        )?;
        let max = f64::from(self.max_chars);
        check_range("width", f64::from(self.chars_w), 1.0..=max)?;
        // A derived height replaces whatever the caller supplied.
        if !self.keep_aspect {
            check_range("height", f64::from(self.chars_h), 1.0..=max)?;
        }
        Ok(())
    }
}
