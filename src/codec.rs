//! Codec adapter: encoded bytes <-> `PixelBuffer`.
//!
//! Backed by the `image` crate with only JPEG and PNG enabled. Decoding is
//! fallible and never panics; the caller (pipeline) decides the
//! graceful-degradation policy. Encoding defaults to JPEG, which has no
//! alpha channel, so the buffer is flattened to RGB first; PNG keeps RGBA.

use std::io::Cursor;

use image::{ImageFormat, RgbImage, RgbaImage};

use crate::buffer::PixelBuffer;
use crate::error::FilterError;

/// Target format for `encode`. JPEG unless the caller says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

/// Decode JPEG/PNG bytes into an RGBA pixel buffer.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, FilterError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| FilterError::Decode(format!("unsupported or corrupt image: {}", e)))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Encode a pixel buffer to the requested format.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, FilterError> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Jpeg => {
            // JPEG carries no alpha; drop it.
            let mut rgb = RgbImage::new(width, height);
            let view = buffer.view();
            for y in 0..height as usize {
                for x in 0..width as usize {
                    rgb.put_pixel(
                        x as u32,
                        y as u32,
                        image::Rgb([view[[y, x, 0]], view[[y, x, 1]], view[[y, x, 2]]]),
                    );
                }
            }
            rgb.write_to(&mut out, ImageFormat::Jpeg)
                .map_err(|e| FilterError::Encode(format!("jpeg encoding failed: {}", e)))?;
        }
        OutputFormat::Png => {
            let rgba = RgbaImage::from_raw(width, height, buffer.clone().into_raw())
                .ok_or_else(|| FilterError::Encode("pixel data length mismatch".to_string()))?;
            rgba.write_to(&mut out, ImageFormat::Png)
                .map_err(|e| FilterError::Encode(format!("png encoding failed: {}", e)))?;
        }
    }
    Ok(out.into_inner())
}
