//! In-memory decoded image: an RGBA8 raster plus dimensions.
//!
//! All kernels operate on views of this buffer. The backing store is an
//! `ndarray::Array3<u8>` of shape `(height, width, 4)`, row-major with the
//! origin at the top-left. Buffers are owned values: every kernel call
//! consumes a view and returns a fresh buffer, so there is never aliasing
//! across concurrent mutation.

use ndarray::{Array3, ArrayView3};

use crate::error::FilterError;

/// Number of channels in every buffer (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Decoded RGBA8 image raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Create a transparent black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: Array3::<u8>::zeros((height as usize, width as usize, CHANNELS)),
        }
    }

    /// Wrap an existing `(height, width, 4)` array.
    ///
    /// # Panics
    /// Panics if the array does not have exactly 4 channels. Kernels always
    /// produce 4-channel arrays, so this is an internal programming error,
    /// not an input condition.
    pub fn from_array(data: Array3<u8>) -> Self {
        assert_eq!(data.dim().2, CHANNELS, "PixelBuffer requires RGBA data");
        Self { data }
    }

    /// Build a buffer from raw RGBA bytes (row-major, 4 bytes per pixel).
    ///
    /// # Arguments
    /// * `width` / `height` - Image dimensions in pixels
    /// * `bytes` - Exactly `width * height * 4` bytes
    ///
    /// # Returns
    /// The buffer, or `FilterError::Decode` when the length does not match.
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, FilterError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| FilterError::Decode("image dimensions overflow".to_string()))?;
        if bytes.len() != expected {
            return Err(FilterError::Decode(format!(
                "raw buffer length {} does not match {}x{} RGBA",
                bytes.len(),
                width,
                height
            )));
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), bytes)
            .map_err(|e| FilterError::Decode(format!("raw buffer shape error: {}", e)))?;
        Ok(Self { data })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    /// Borrow the raster as an ndarray view for kernel input.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Read one pixel as `(r, g, b, a)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let (y, x) = (y as usize, x as usize);
        (
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        )
    }

    /// Consume the buffer, yielding the backing array.
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Consume the buffer, yielding contiguous row-major RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        // Kernel outputs are standard-layout; the copy branch only covers
        // arrays that were sliced or transposed before wrapping.
        let data = if self.data.is_standard_layout() {
            self.data
        } else {
            self.data.as_standard_layout().to_owned()
        };
        let (vec, _offset) = data.into_raw_vec_and_offset();
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent_black() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.pixel(2, 1), (0, 0, 0, 0));
    }

    #[test]
    fn test_from_raw_roundtrip() {
        let bytes = vec![
            10, 20, 30, 255, //
            40, 50, 60, 128,
        ];
        let buf = PixelBuffer::from_raw(2, 1, bytes.clone()).unwrap();
        assert_eq!(buf.pixel(1, 0), (40, 50, 60, 128));
        assert_eq!(buf.into_raw(), bytes);
    }

    #[test]
    fn test_from_raw_rejects_bad_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(err, FilterError::Decode(_)));
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds_panics() {
        let buf = PixelBuffer::new(2, 2);
        buf.pixel(2, 0);
    }
}
