//! Color adjustment kernels: brightness, contrast, saturation, sepia, invert.
//!
//! Pixel-wise operations without spatial context. All arithmetic clamps the
//! output channel to 0-255; the alpha channel is always preserved.

use ndarray::{Array3, ArrayView3};

// ============================================================================
// Color Space Conversion Utilities
// ============================================================================

/// Convert RGB to HSL.
/// Input: r, g, b in 0.0-1.0
/// Output: (h, s, l) where h is 0.0-360.0, s and l are 0.0-1.0
#[inline]
pub(crate) fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < 1e-6 {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / d;
        if g < b {
            h += 6.0;
        }
        h * 60.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };

    (h, s, l)
}

/// Convert HSL to RGB.
/// Input: h in 0.0-360.0, s and l in 0.0-1.0
/// Output: (r, g, b) in 0.0-1.0
#[inline]
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s.abs() < 1e-6 {
        return (l, l, l);
    }

    let hue_to_channel = |p: f32, q: f32, mut t: f32| -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hn = h / 360.0;

    (
        hue_to_channel(p, q, hn + 1.0 / 3.0),
        hue_to_channel(p, q, hn),
        hue_to_channel(p, q, hn - 1.0 / 3.0),
    )
}

// ============================================================================
// Brightness
// ============================================================================

/// Adjust image brightness.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `factor` - -1.0 to 1.0, mapped to an additive offset of `factor * 100`;
///   0.0 is a no-op
///
/// # Returns
/// Brightness-adjusted image, alpha preserved
pub fn brightness(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));
    let offset = factor * 100.0;

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let v = input[[y, x, c]] as f32 + offset;
                output[[y, x, c]] = v.clamp(0.0, 255.0) as u8;
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Contrast
// ============================================================================

/// Adjust image contrast by linear scaling around mid-gray.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `factor` - Multiplier around 127.5; 1.0 = no change
///
/// # Returns
/// Contrast-adjusted image, alpha preserved
pub fn contrast(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let v = input[[y, x, c]] as f32;
                let adjusted = (v - 127.5) * factor + 127.5;
                output[[y, x, c]] = adjusted.clamp(0.0, 255.0) as u8;
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Saturation
// ============================================================================

/// Adjust image saturation in HSL space.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `factor` - Saturation multiplier; 1.0 = no change, 0.0 = grayscale
///
/// # Returns
/// Saturation-adjusted image, alpha preserved
pub fn saturation(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32 / 255.0;
            let g = input[[y, x, 1]] as f32 / 255.0;
            let b = input[[y, x, 2]] as f32 / 255.0;

            let (h, s, l) = rgb_to_hsl(r, g, b);
            let (nr, ng, nb) = hsl_to_rgb(h, (s * factor).clamp(0.0, 1.0), l);

            output[[y, x, 0]] = (nr * 255.0).clamp(0.0, 255.0) as u8;
            output[[y, x, 1]] = (ng * 255.0).clamp(0.0, 255.0) as u8;
            output[[y, x, 2]] = (nb * 255.0).clamp(0.0, 255.0) as u8;
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia tone-transfer matrix, rows are output R, G, B.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply the fixed sepia tone matrix.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
///
/// # Returns
/// Sepia-toned image with each channel clamped to 0-255, alpha preserved
pub fn sepia(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f32;
            let g = input[[y, x, 1]] as f32;
            let b = input[[y, x, 2]] as f32;

            for (c, row) in SEPIA.iter().enumerate() {
                let v = row[0] * r + row[1] * g + row[2] * b;
                output[[y, x, c]] = v.clamp(0.0, 255.0) as u8;
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Invert
// ============================================================================

/// Invert image colors.
///
/// Applying twice restores the original image exactly.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
///
/// # Returns
/// Color-inverted image, alpha preserved
pub fn invert(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                output[[y, x, c]] = 255 - input[[y, x, c]];
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img[[0, 0, 3]] = a;
        img
    }

    // ========================================================================
    // Brightness Tests
    // ========================================================================

    #[test]
    fn test_brightness_offset_is_factor_times_100() {
        let img = pixel(100, 100, 100, 255);
        let result = brightness(img.view(), 0.5);
        assert_eq!(result[[0, 0, 0]], 150);
        assert_eq!(result[[0, 0, 3]], 255);
    }

    #[test]
    fn test_brightness_zero_is_noop() {
        let img = pixel(13, 77, 240, 9);
        let result = brightness(img.view(), 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_brightness_clamps() {
        let img = pixel(250, 2, 0, 255);
        let up = brightness(img.view(), 1.0);
        assert_eq!(up[[0, 0, 0]], 255);
        let down = brightness(img.view(), -1.0);
        assert_eq!(down[[0, 0, 1]], 0);
    }

    // ========================================================================
    // Contrast Tests
    // ========================================================================

    #[test]
    fn test_contrast_neutral_factor() {
        let img = pixel(30, 128, 222, 64);
        let result = contrast(img.view(), 1.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_contrast_spreads_around_midgray() {
        let img = pixel(100, 200, 0, 255);
        let result = contrast(img.view(), 2.0);
        assert_eq!(result[[0, 0, 0]], 72); // (100 - 127.5) * 2 + 127.5
        assert_eq!(result[[0, 0, 1]], 255); // clamped
        assert_eq!(result[[0, 0, 2]], 0);
    }

    // ========================================================================
    // Saturation Tests
    // ========================================================================

    #[test]
    fn test_saturation_zero_goes_gray() {
        let img = pixel(255, 0, 0, 255);
        let result = saturation(img.view(), 0.0);
        assert_eq!(result[[0, 0, 0]], result[[0, 0, 1]]);
        assert_eq!(result[[0, 0, 1]], result[[0, 0, 2]]);
    }

    #[test]
    fn test_saturation_neutral_is_close_to_identity() {
        let img = pixel(180, 90, 40, 255);
        let result = saturation(img.view(), 1.0);
        for c in 0..3 {
            let diff = (result[[0, 0, c]] as i32 - img[[0, 0, c]] as i32).abs();
            assert!(diff <= 1, "channel {} drifted by {}", c, diff);
        }
    }

    #[test]
    fn test_hsl_roundtrip() {
        let (h, s, l) = rgb_to_hsl(0.8, 0.2, 0.4);
        let (r, g, b) = hsl_to_rgb(h, s, l);
        assert!((r - 0.8).abs() < 1e-3);
        assert!((g - 0.2).abs() < 1e-3);
        assert!((b - 0.4).abs() < 1e-3);
    }

    // ========================================================================
    // Sepia Tests
    // ========================================================================

    #[test]
    fn test_sepia_white_clamps() {
        let img = pixel(255, 255, 255, 255);
        let result = sepia(img.view());
        // Top row sums to 1.351, so R saturates.
        assert_eq!(result[[0, 0, 0]], 255);
        assert!(result[[0, 0, 2]] < 255);
    }

    #[test]
    fn test_sepia_matrix_values() {
        let img = pixel(100, 0, 0, 31);
        let result = sepia(img.view());
        assert_eq!(result[[0, 0, 0]], 39); // 0.393 * 100
        assert_eq!(result[[0, 0, 1]], 34); // 0.349 * 100
        assert_eq!(result[[0, 0, 2]], 27); // 0.272 * 100
        assert_eq!(result[[0, 0, 3]], 31);
    }

    // ========================================================================
    // Invert Tests
    // ========================================================================

    #[test]
    fn test_invert_values() {
        let img = pixel(100, 200, 50, 128);
        let result = invert(img.view());
        assert_eq!(result[[0, 0, 0]], 155);
        assert_eq!(result[[0, 0, 1]], 55);
        assert_eq!(result[[0, 0, 2]], 205);
        assert_eq!(result[[0, 0, 3]], 128); // Alpha unchanged
    }

    #[test]
    fn test_invert_is_involution() {
        let img = pixel(3, 254, 127, 200);
        let result = invert(invert(img.view()).view());
        assert_eq!(result, img);
    }
}
