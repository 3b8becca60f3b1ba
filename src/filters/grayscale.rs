//! Grayscale conversion kernel.
//!
//! Uses ITU-R BT.709 luminosity coefficients. Output is RGBA with
//! R=G=B=luminosity and the alpha channel preserved.

use ndarray::{Array3, ArrayView3};

/// ITU-R BT.709 luminosity coefficients.
pub(crate) const LUMA_R: f32 = 0.2126;
pub(crate) const LUMA_G: f32 = 0.7152;
pub(crate) const LUMA_B: f32 = 0.0722;

/// Luminance of one pixel under BT.709 weights.
#[inline]
pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Convert an RGBA image to grayscale (luminosity method).
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
///
/// # Returns
/// New image with the luminance written to R, G and B; alpha preserved
pub fn grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32;
            let g = input[[y, x, 1]] as f32;
            let b = input[[y, x, 2]] as f32;

            let gray = luminance(r, g, b).clamp(0.0, 255.0) as u8;

            output[[y, x, 0]] = gray;
            output[[y, x, 1]] = gray;
            output[[y, x, 2]] = gray;
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }

    output
}
