//! Writing rendered grids out as UTF-8 text or as a PNG picture of the text.

use std::io::Write;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::braille::{position_bit, BrailleGrid};

/// Canvas color behind the glyphs.
pub const PNG_BACKGROUND: [u8; 4] = [0x00, 0x12, 0x1a, 0xff];
/// Color of a raised dot.
pub const PNG_FOREGROUND: [u8; 4] = [0xe6, 0xee, 0xf6, 0xff];
/// Neither side of an exported PNG exceeds this many pixels.
pub const MAX_PNG_SIDE: u32 = 8192;
pub const DEFAULT_FONT_SIZE: u32 = 12;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to save PNG '{path}': {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Stream the grid's text form into `writer`.
pub fn write_to<W: Write>(mut writer: W, grid: &BrailleGrid) -> Result<(), ExportError> {
    writer.write_all(grid.to_text().as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the grid to a text file, replacing any existing file.
pub fn write_text(path: &Path, grid: &BrailleGrid) -> Result<(), ExportError> {
    std::fs::write(path, grid.to_text()).map_err(|source| ExportError::File {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote {}x{} grid to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

/// Pixel size of one character cell for a monospace font of `font_size` px.
pub fn cell_size(font_size: u32) -> (u32, u32) {
    let fs = f64::from(font_size.max(1));
    ((fs * 0.6).ceil() as u32, (fs * 0.95).ceil() as u32)
}

/// Draw the grid as light dots on a dark canvas.
///
/// Each glyph occupies one [`cell_size`] cell, split into a 2x4 lattice with
/// one dot per raised position. The canvas is at least 1x1 and is clipped to
/// [`MAX_PNG_SIDE`] on both axes.
pub fn rasterize(grid: &BrailleGrid, font_size: u32) -> RgbaImage {
    let (char_w, char_h) = cell_size(font_size);
    let width = grid.width().saturating_mul(char_w).clamp(1, MAX_PNG_SIDE);
    let height = grid.height().saturating_mul(char_h).clamp(1, MAX_PNG_SIDE);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(PNG_BACKGROUND));

    let (sub_w, sub_h) = ((char_w / 2).max(1), (char_h / 4).max(1));
    // leave a one pixel gap between neighbouring dots when there is room
    let dot_w = if sub_w > 1 { sub_w - 1 } else { 1 };
    let dot_h = if sub_h > 1 { sub_h - 1 } else { 1 };

    for cy in 0..grid.height() {
        let top = cy.saturating_mul(char_h);
        if top >= height {
            break;
        }
        for cx in 0..grid.width() {
            let left = cx.saturating_mul(char_w);
            if left >= width {
                break;
            }
            let mask = grid.mask(cx, cy);
            if mask == 0 {
                continue;
            }
            for row in 0..4u32 {
                for column in 0..2u32 {
                    if mask & position_bit(column as usize, row as usize) == 0 {
                        continue;
                    }
                    let x0 = left + column * sub_w;
                    let y0 = top + row * sub_h;
                    for y in y0..(y0 + dot_h).min(height) {
                        for x in x0..(x0 + dot_w).min(width) {
                            canvas.put_pixel(x, y, Rgba(PNG_FOREGROUND));
                        }
                    }
                }
            }
        }
    }
    canvas
}

/// Save the grid as a PNG image, replacing any existing file.
pub fn write_png(path: &Path, grid: &BrailleGrid, font_size: u32) -> Result<(), ExportError> {
    let canvas = rasterize(grid, font_size);
    canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ExportError::Png {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!(
        "wrote {}x{} px PNG to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}
