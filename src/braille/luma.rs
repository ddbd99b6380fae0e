//! RGB to luma conversion using the ITU-R BT.601 weights.

/// Red weight in the luma formula.
pub const LUMA_R: f64 = 0.299;
/// Green weight in the luma formula.
pub const LUMA_G: f64 = 0.587;
/// Blue weight in the luma formula.
pub const LUMA_B: f64 = 0.114;

/// Weighted brightness `0.299*R + 0.587*G + 0.114*B`.
///
/// Works on unclamped intermediate values as well as 8-bit channels, so the
/// color adjuster can take the gray point of contrast-adjusted RGB. No gamma
/// handling is applied.
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Luma of an RGBA pixel. Alpha is ignored.
#[inline]
pub fn pixel_luma(rgba: [u8; 4]) -> f64 {
    luma(f64::from(rgba[0]), f64::from(rgba[1]), f64::from(rgba[2]))
}
