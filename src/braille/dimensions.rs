//! Grid size resolution, including keep-aspect height derivation.

use super::resample::{DOTS_PER_CHAR_X, DOTS_PER_CHAR_Y};
use crate::params::GlyphGridRequest;

/// Derive the grid height from `chars_w` and the source aspect ratio.
///
/// The source is scaled to exactly `chars_w * 2` dots wide; the matching dot
/// height is rounded, then divided into 4-dot rows and rounded again. The
/// result is at least 1 and at most `max_chars`.
pub fn derive_chars_h(src_w: u32, src_h: u32, chars_w: u32, max_chars: u32) -> u32 {
    if src_w == 0 || src_h == 0 {
        return 1;
    }
    let px_w = f64::from(chars_w) * f64::from(DOTS_PER_CHAR_X);
    let px_h = (f64::from(src_h) * (px_w / f64::from(src_w))).round();
    let chars_h = (px_h / f64::from(DOTS_PER_CHAR_Y)).round().max(1.0);
    (chars_h as u32).clamp(1, max_chars.max(1))
}

/// Final `(chars_w, chars_h)` for a request against a source of the given size.
///
/// Without `keep_aspect` the request's own dimensions are used unchanged.
pub fn resolve_grid(src_w: u32, src_h: u32, request: &GlyphGridRequest) -> (u32, u32) {
    if request.keep_aspect {
        let chars_h = derive_chars_h(src_w, src_h, request.chars_w, request.max_chars);
        log::debug!(
            "keep-aspect: {}x{} source at {} chars wide -> {} rows",
            src_w,
            src_h,
            request.chars_w,
            chars_h
        );
        (request.chars_w, chars_h)
    } else {
        (request.chars_w, request.chars_h)
    }
}
