//! Luma thresholding into Unicode braille characters.
//!
//! Each braille character represents a 2x4 dot matrix, giving 8 subpixels
//! per character cell. Dot numbers follow the Unicode braille layout:
//! ```text
//! column:  0  1
//! row 0    1  4
//! row 1    2  5
//! row 2    3  6
//! row 3    7  8
//! ```
//! Dot `n` sets bit `1 << (n - 1)` of the mask, and the character is
//! `U+2800 + mask`.

use std::fmt;

use super::luma::pixel_luma;
use super::resample::{DOTS_PER_CHAR_X, DOTS_PER_CHAR_Y};
use crate::frame::PixelBuffer;

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Dot number at `[column][row]` of a cell.
pub const DOT_NUMBERS: [[u8; 4]; 2] = [[1, 2, 3, 7], [4, 5, 6, 8]];

/// Mask bit for a 1-indexed dot number.
#[inline]
pub const fn dot_bit(dot: u8) -> u8 {
    1 << (dot - 1)
}

/// Mask bit for the dot at `(column, row)` inside a cell.
#[inline]
pub const fn position_bit(column: usize, row: usize) -> u8 {
    dot_bit(DOT_NUMBERS[column][row])
}

/// Character for an 8-bit dot mask.
#[inline]
pub fn mask_to_char(mask: u8) -> char {
    char::from_u32(BRAILLE_BASE as u32 + u32::from(mask)).unwrap_or(BRAILLE_BASE)
}

/// Dot mask of a braille character, or `None` outside U+2800..=U+28FF.
#[inline]
pub fn char_to_mask(c: char) -> Option<u8> {
    let offset = (c as u32).checked_sub(BRAILLE_BASE as u32)?;
    u8::try_from(offset).ok()
}

/// Convert a 2x4 boolean grid (`grid[column][row]`) to a braille character.
pub fn grid_to_braille(grid: [[bool; 4]; 2]) -> char {
    let mut mask = 0u8;
    for (column, rows) in grid.iter().enumerate() {
        for (row, &on) in rows.iter().enumerate() {
            if on {
                mask |= position_bit(column, row);
            }
        }
    }
    mask_to_char(mask)
}

/// Whether a dot with the given luma is on.
///
/// Luma exactly equal to the threshold is off in both polarities.
#[inline]
pub fn dot_on(luma: f64, threshold: u8, invert: bool) -> bool {
    let t = f64::from(threshold);
    if invert {
        luma < t
    } else {
        luma > t
    }
}

/// Encoder input does not match the requested grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error(
        "encoder expects a {expected_w}x{expected_h} pixel buffer for the grid, got {actual_w}x{actual_h}"
    )]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

/// Rows of braille characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrailleGrid {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl BrailleGrid {
    /// Grid with no rows. Its text form is the empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Width in characters.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in characters (number of rows).
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Character at cell `(cx, cy)`.
    pub fn cell(&self, cx: u32, cy: u32) -> char {
        self.cells[(cy * self.width + cx) as usize]
    }

    /// Dot mask at cell `(cx, cy)`.
    pub fn mask(&self, cx: u32, cy: u32) -> u8 {
        char_to_mask(self.cell(cx, cy)).unwrap_or(0)
    }

    /// Iterate over rows as character slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Text form: every row followed by a single newline.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BrailleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row {
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Threshold a `chars_w*2 x chars_h*4` buffer into a braille grid.
///
/// Fails when the buffer dimensions do not match the grid exactly.
pub fn encode(
    px: &PixelBuffer,
    chars_w: u32,
    chars_h: u32,
    threshold: u8,
    invert: bool,
) -> Result<BrailleGrid, EncodeError> {
    let expected_w = chars_w.saturating_mul(DOTS_PER_CHAR_X);
    let expected_h = chars_h.saturating_mul(DOTS_PER_CHAR_Y);
    if px.width != expected_w || px.height != expected_h {
        return Err(EncodeError::DimensionMismatch {
            expected_w,
            expected_h,
            actual_w: px.width,
            actual_h: px.height,
        });
    }

    let mut cells = Vec::with_capacity(chars_w as usize * chars_h as usize);
    for cy in 0..chars_h {
        for cx in 0..chars_w {
            cells.push(cell_char(px, cx, cy, threshold, invert));
        }
    }

    Ok(BrailleGrid {
        width: chars_w,
        height: chars_h,
        cells,
    })
}

/// Braille character for the 2x4 block belonging to cell `(cx, cy)`.
fn cell_char(px: &PixelBuffer, cx: u32, cy: u32, threshold: u8, invert: bool) -> char {
    let mut dots = [[false; 4]; 2];
    for (column, rows) in dots.iter_mut().enumerate() {
        for (row, on) in rows.iter_mut().enumerate() {
            let x = cx * DOTS_PER_CHAR_X + column as u32;
            let y = cy * DOTS_PER_CHAR_Y + row as u32;
            *on = dot_on(pixel_luma(px.pixel(x, y)), threshold, invert);
        }
    }
    grid_to_braille(dots)
}
