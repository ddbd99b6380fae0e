//! End-to-end render: source buffer + parameters -> braille grid.
//!
//! The pipeline is stateless. Callers re-run [`render`] whenever any
//! parameter changes; nothing is retained between calls.

use std::time::Instant;

use crate::braille::{self, BrailleGrid, EncodeError};
use crate::frame::PixelBuffer;
use crate::params::{AdjustmentParams, GlyphGridRequest};

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    /// Stages were composed with mismatched dimensions
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Run the full pipeline.
///
/// Order: color adjustment, sharpening (only when `sharpness > 0.01`),
/// keep-aspect height derivation, resampling, braille encoding. A source
/// with a zero dimension yields an empty grid.
pub fn render(
    source: &PixelBuffer,
    params: &AdjustmentParams,
    request: &GlyphGridRequest,
) -> Result<BrailleGrid, RenderError> {
    if source.is_empty() {
        log::debug!(
            "empty source ({}x{}), nothing to render",
            source.width,
            source.height
        );
        return Ok(BrailleGrid::empty());
    }

    let started = Instant::now();

    let adjusted = braille::adjust(source, params);
    let sharpened = braille::apply_sharpness(adjusted, params.sharpness);

    let (chars_w, chars_h) = braille::resolve_grid(source.width, source.height, request);
    let dots = braille::fit(&sharpened, chars_w, chars_h);
    let grid = braille::encode(&dots, chars_w, chars_h, request.threshold, request.invert)?;

    log::debug!(
        "rendered {}x{} source into {}x{} cells in {:?}",
        source.width,
        source.height,
        chars_w,
        chars_h,
        started.elapsed()
    );

    Ok(grid)
}
