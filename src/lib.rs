//! braille-art library crate.
//!
//! Renders raster images as Unicode Braille text. The core is a pure
//! pipeline over [`frame::PixelBuffer`]; decoding, caching, config and
//! export sit around it.

pub mod braille;
pub mod cache;
pub mod config;
pub mod decode;
pub mod export;
pub mod frame;
pub mod params;
pub mod pipeline;

pub use braille::{BrailleGrid, EncodeError};
pub use cache::RenderCache;
pub use decode::{Decode, DecodeError, ImageDecoder};
pub use frame::{FrameError, PixelBuffer};
pub use params::{AdjustmentParams, GlyphGridRequest, ParamError};
pub use pipeline::{render, RenderError};
