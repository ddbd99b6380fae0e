//! Bitmap decoding, supplied to the pipeline as an injected capability.
//!
//! The render core only ever sees a [`PixelBuffer`]; anything that turns
//! bytes into pixels implements [`Decode`].

use std::path::{Path, PathBuf};

use image::Rgba;

use crate::frame::{FrameError, PixelBuffer};

/// Errors that can occur while decoding a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Turns encoded image bytes into RGBA pixels.
pub trait Decode {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError>;

    /// Read `path` and decode its contents.
    fn decode_file(&self, path: &Path) -> Result<PixelBuffer, DecodeError> {
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("read {} bytes from {}", bytes.len(), path.display());
        self.decode(&bytes)
    }
}

/// Decoder backed by the `image` crate.
///
/// The format is sniffed from the content. Animated formats yield their
/// first frame only. Pixels with zero alpha come back as `[0, 0, 0, 0]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl Decode for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        let mut rgba = image::load_from_memory(bytes)?.into_rgba8();
        // fully transparent pixels carry no color, so they read as black
        for px in rgba.pixels_mut() {
            if px[3] == 0 {
                *px = Rgba([0, 0, 0, 0]);
            }
        }
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {}x{} image", width, height);
        Ok(PixelBuffer::new(width, height, rgba.into_raw())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        let buf = ImageDecoder.decode(&png_bytes(&img)).unwrap();
        assert_eq!((buf.width, buf.height), (3, 2));
        assert_eq!(buf.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(buf.pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_clears_transparent_color() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([200, 150, 100, 0]));
        img.put_pixel(1, 0, Rgba([200, 150, 100, 1]));
        let buf = ImageDecoder.decode(&png_bytes(&img)).unwrap();
        assert_eq!(buf.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(buf.pixel(1, 0), [200, 150, 100, 1]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = ImageDecoder.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn test_decode_missing_file() {
        let err = ImageDecoder
            .decode_file(Path::new("/nonexistent/braille-art/input.png"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/braille-art/input.png"));
    }
}
