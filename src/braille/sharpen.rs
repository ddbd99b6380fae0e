//! 3x3 unsharp-style sharpening.
//!
//! The kernel used is:
//! ```text
//! [ 0 -1  0]
//! [-1  c -1]     c = 5 + 2 * sharpness
//! [ 0 -1  0]
//! ```
//! It is not normalized: its weights sum to `1 + 2 * sharpness`,
//! so a flat region of value `v` comes out as `v * (1 + 2 * sharpness)`.
//! Sharpening therefore also brightens. Borders are edge-replicated.

use super::adjust::clamp_channel;
use crate::frame::PixelBuffer;

/// Sharpness at or below this value skips the convolution entirely.
pub const MIN_SHARPNESS: f64 = 0.01;

/// Base weight of the kernel center before the sharpness boost.
const CENTER_BASE: f64 = 5.0;

/// A 3x3 convolution kernel, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvolutionKernel {
    pub weights: [[f64; 3]; 3],
}

impl ConvolutionKernel {
    /// The sharpening kernel for the given amount.
    pub fn sharpen(amount: f64) -> Self {
        let c = CENTER_BASE + 2.0 * amount;
        Self {
            weights: [[0.0, -1.0, 0.0], [-1.0, c, -1.0], [0.0, -1.0, 0.0]],
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }
}

/// Convolve every channel (alpha included) with the sharpening kernel.
///
/// Out-of-range neighbors are clamped to the nearest valid row/column.
/// Each result is clamped to `[0, 255]` and rounded.
pub fn sharpen(src: &PixelBuffer, sharpness: f64) -> PixelBuffer {
    if src.is_empty() {
        return src.clone();
    }

    let kernel = ConvolutionKernel::sharpen(sharpness);
    let w = src.width as i64;
    let h = src.height as i64;
    let mut out = PixelBuffer::blank(src.width, src.height);

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f64; 4];

            for (ky, row) in kernel.weights.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    if weight == 0.0 {
                        continue;
                    }
                    let sx = (x + kx as i64 - 1).clamp(0, w - 1) as u32;
                    let sy = (y + ky as i64 - 1).clamp(0, h - 1) as u32;
                    let px = src.pixel(sx, sy);
                    for (a, &v) in acc.iter_mut().zip(px.iter()) {
                        *a += f64::from(v) * weight;
                    }
                }
            }

            out.put_pixel(
                x as u32,
                y as u32,
                [
                    clamp_channel(acc[0]),
                    clamp_channel(acc[1]),
                    clamp_channel(acc[2]),
                    clamp_channel(acc[3]),
                ],
            );
        }
    }

    out
}

/// Sharpen when `sharpness > MIN_SHARPNESS`, otherwise hand back `src` as is.
pub fn apply_sharpness(src: PixelBuffer, sharpness: f64) -> PixelBuffer {
    if sharpness > MIN_SHARPNESS {
        sharpen(&src, sharpness)
    } else {
        if sharpness > 0.0 {
            log::debug!("sharpness {sharpness} below {MIN_SHARPNESS}, skipping convolution");
        }
        src
    }
}
