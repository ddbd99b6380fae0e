//! Pixel transforms and braille rasterization.
//!
//! The stages, in pipeline order:
//!
//! 1. **Color adjustment** - brightness, contrast, saturation
//! 2. **Sharpening** - optional unnormalized 3x3 convolution
//! 3. **Resampling** - aspect-preserving fit into the dot grid
//! 4. **Encoding** - luma threshold into braille characters
//!
//! Every stage takes a buffer by reference and returns a new one.

pub mod adjust;
pub mod dimensions;
pub mod encode;
pub mod luma;
pub mod resample;
pub mod sharpen;

pub use adjust::{adjust, contrast_factor};
pub use dimensions::{derive_chars_h, resolve_grid};
pub use encode::{
    char_to_mask, dot_bit, dot_on, encode, grid_to_braille, mask_to_char, position_bit,
    BrailleGrid, EncodeError, BRAILLE_BASE, DOT_NUMBERS,
};
pub use luma::{luma, pixel_luma};
pub use resample::{
    fit, fit_layout, resize, shrink_to_fit, FitLayout, DOTS_PER_CHAR_X, DOTS_PER_CHAR_Y,
};
pub use sharpen::{apply_sharpness, sharpen, ConvolutionKernel, MIN_SHARPNESS};
