//! Aspect-preserving resampling into the braille dot grid.
//!
//! Every character cell covers a 2x4 block of dots, so a `chars_w x chars_h`
//! grid needs a `chars_w*2 x chars_h*4` pixel buffer. The source is scaled
//! uniformly to fit, centered, and the uncovered margins stay fully
//! transparent black.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::frame::PixelBuffer;

/// Braille has 2 horizontal dots per character.
pub const DOTS_PER_CHAR_X: u32 = 2;
/// Braille has 4 vertical dots per character.
pub const DOTS_PER_CHAR_Y: u32 = 4;

/// Placement of the scaled source inside the target buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitLayout {
    /// Scaled width
    pub dw: u32,
    /// Scaled height
    pub dh: u32,
    /// Left margin
    pub dx: u32,
    /// Top margin
    pub dy: u32,
}

/// Compute where a `src_w x src_h` image lands inside `px_w x px_h`.
pub fn fit_layout(src_w: u32, src_h: u32, px_w: u32, px_h: u32) -> FitLayout {
    let scale = (f64::from(px_w) / f64::from(src_w)).min(f64::from(px_h) / f64::from(src_h));
    let dw = ((f64::from(src_w) * scale).round() as u32).min(px_w);
    let dh = ((f64::from(src_h) * scale).round() as u32).min(px_h);
    let dx = (f64::from(px_w - dw) / 2.0).round() as u32;
    let dy = (f64::from(px_h - dh) / 2.0).round() as u32;
    FitLayout { dw, dh, dx, dy }
}

/// Resample `src` to `chars_w*2 x chars_h*4` pixels, preserving its aspect
/// ratio.
pub fn fit(src: &PixelBuffer, chars_w: u32, chars_h: u32) -> PixelBuffer {
    let px_w = chars_w.saturating_mul(DOTS_PER_CHAR_X);
    let px_h = chars_h.saturating_mul(DOTS_PER_CHAR_Y);

    if src.is_empty() || px_w == 0 || px_h == 0 {
        return PixelBuffer::blank(px_w, px_h);
    }

    let layout = fit_layout(src.width, src.height, px_w, px_h);
    log::debug!(
        "fit {}x{} into {}x{}: region {}x{} at ({}, {})",
        src.width,
        src.height,
        px_w,
        px_h,
        layout.dw,
        layout.dh,
        layout.dx,
        layout.dy
    );

    if layout.dw == 0 || layout.dh == 0 {
        return PixelBuffer::blank(px_w, px_h);
    }

    let Some(scaled) = resized(src, layout.dw, layout.dh) else {
        log::warn!("pixel data does not match {}x{}, fitting nothing", src.width, src.height);
        return PixelBuffer::blank(px_w, px_h);
    };

    // Margins stay RGBA 0.
    let mut canvas = RgbaImage::new(px_w, px_h);
    imageops::replace(
        &mut canvas,
        &scaled,
        i64::from(layout.dx),
        i64::from(layout.dy),
    );
    PixelBuffer::from(canvas)
}

/// Downscale `src` so that it fits within `max_w x max_h`, never enlarging.
///
/// A zero bound disables the limit for that axis.
pub fn shrink_to_fit(src: &PixelBuffer, max_w: u32, max_h: u32) -> PixelBuffer {
    if src.is_empty() {
        return src.clone();
    }
    let sx = if max_w == 0 {
        1.0
    } else {
        f64::from(max_w) / f64::from(src.width)
    };
    let sy = if max_h == 0 {
        1.0
    } else {
        f64::from(max_h) / f64::from(src.height)
    };
    let scale = sx.min(sy).min(1.0);
    if scale >= 1.0 {
        return src.clone();
    }

    let w = ((f64::from(src.width) * scale).round() as u32).max(1);
    let h = ((f64::from(src.height) * scale).round() as u32).max(1);
    log::debug!("shrinking source {}x{} to {}x{}", src.width, src.height, w, h);
    resize(src, w, h)
}

/// Resize with a triangle (linear) filter. The filter support widens on
/// downscale, so every source pixel contributes.
///
/// Equal source and target sizes reproduce the source exactly.
pub fn resize(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> PixelBuffer {
    match resized(src, dst_w, dst_h) {
        Some(img) => PixelBuffer::from(img),
        None => {
            log::warn!("pixel data does not match {}x{}, resizing nothing", src.width, src.height);
            PixelBuffer::blank(dst_w, dst_h)
        }
    }
}

fn resized(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> Option<RgbaImage> {
    let view = src.as_image()?;
    if view.dimensions() == (dst_w, dst_h) {
        return RgbaImage::from_raw(dst_w, dst_h, src.data.clone());
    }
    Some(imageops::resize(&view, dst_w, dst_h, FilterType::Triangle))
}
