//! Geometric kernels: resize, rotate, crop, flip.
//!
//! The only kernels that change output dimensions. Resize and rotate use
//! bilinear sampling; rotate grows the canvas to bound the rotated content
//! and fills uncovered pixels with transparency.

use ndarray::{Array3, ArrayView3};

use crate::error::FilterError;
use crate::request::FlipAxis;

/// Bilinear sample with coordinates clamped to the image, for resampling
/// where every target pixel maps inside the source.
#[inline]
fn sample_bilinear_clamped(input: &ArrayView3<u8>, x: f32, y: f32) -> [f32; 4] {
    let (height, width, _) = input.dim();
    let x = x.clamp(0.0, width as f32 - 1.0);
    let y = y.clamp(0.0, height as f32 - 1.0);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let mut out = [0.0f32; 4];
    for (c, v) in out.iter_mut().enumerate() {
        let top = input[[y0, x0, c]] as f32 * (1.0 - fx) + input[[y0, x1, c]] as f32 * fx;
        let bottom = input[[y1, x0, c]] as f32 * (1.0 - fx) + input[[y1, x1, c]] as f32 * fx;
        *v = top * (1.0 - fy) + bottom * fy;
    }
    out
}

/// Bilinear sample treating everything outside the image as transparent
/// black, for rotation where target pixels can map off the source.
#[inline]
fn sample_bilinear_zero(input: &ArrayView3<u8>, x: f32, y: f32) -> [f32; 4] {
    let (height, width, _) = input.dim();

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let tap = |sx: isize, sy: isize, c: usize| -> f32 {
        if sx < 0 || sy < 0 || sx >= width as isize || sy >= height as isize {
            0.0
        } else {
            input[[sy as usize, sx as usize, c]] as f32
        }
    };

    let mut out = [0.0f32; 4];
    for (c, v) in out.iter_mut().enumerate() {
        let top = tap(x0, y0, c) * (1.0 - fx) + tap(x0 + 1, y0, c) * fx;
        let bottom = tap(x0, y0 + 1, c) * (1.0 - fx) + tap(x0 + 1, y0 + 1, c) * fx;
        *v = top * (1.0 - fy) + bottom * fy;
    }
    out
}

// ============================================================================
// Resize
// ============================================================================

/// Resolve a resize request to concrete dimensions, deriving a missing one
/// from the source aspect ratio.
pub fn resolve_resize_dims(
    src_width: u32,
    src_height: u32,
    width: Option<u32>,
    height: Option<u32>,
) -> (u32, u32) {
    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => {
            let h = (w as f64 * src_height as f64 / src_width as f64).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h)) => {
            let w = (h as f64 * src_width as f64 / src_height as f64).round() as u32;
            (w.max(1), h)
        }
        // Rejected by request validation before the kernel runs.
        (None, None) => (src_width, src_height),
    }
}

/// Bilinear resample to the given dimensions.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `new_width` / `new_height` - Target dimensions, both positive
///
/// # Returns
/// Resampled image of exactly (new_height, new_width, 4)
pub fn resize(input: ArrayView3<u8>, new_width: u32, new_height: u32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let (nw, nh) = (new_width as usize, new_height as usize);
    let mut output = Array3::<u8>::zeros((nh, nw, 4));

    let sx_scale = width as f32 / nw as f32;
    let sy_scale = height as f32 / nh as f32;

    for y in 0..nh {
        for x in 0..nw {
            // Pixel-center mapping keeps the sample grid symmetric.
            let src_x = (x as f32 + 0.5) * sx_scale - 0.5;
            let src_y = (y as f32 + 0.5) * sy_scale - 0.5;
            let sample = sample_bilinear_clamped(&input, src_x, src_y);
            for c in 0..4 {
                output[[y, x, c]] = sample[c].clamp(0.0, 255.0) as u8;
            }
        }
    }
    output
}

// ============================================================================
// Rotate
// ============================================================================

/// Rotate about the image center by an arbitrary angle.
///
/// The output canvas is the bounding box of the rotated content, so
/// dimensions swap exactly for 90 and 270 degrees. Target pixels that map
/// outside the source become transparent black.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `degrees` - Rotation angle in degrees
///
/// # Returns
/// Rotated image on a grown canvas
pub fn rotate(input: ArrayView3<u8>, degrees: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    let new_width = (width as f32 * cos.abs() + height as f32 * sin.abs())
        .round()
        .max(1.0) as usize;
    let new_height = (width as f32 * sin.abs() + height as f32 * cos.abs())
        .round()
        .max(1.0) as usize;

    let src_cx = (width as f32 - 1.0) / 2.0;
    let src_cy = (height as f32 - 1.0) / 2.0;
    let dst_cx = (new_width as f32 - 1.0) / 2.0;
    let dst_cy = (new_height as f32 - 1.0) / 2.0;

    let mut output = Array3::<u8>::zeros((new_height, new_width, 4));
    for y in 0..new_height {
        for x in 0..new_width {
            let dx = x as f32 - dst_cx;
            let dy = y as f32 - dst_cy;

            // Inverse mapping: rotate the target offset back into source space.
            let src_x = cos * dx + sin * dy + src_cx;
            let src_y = -sin * dx + cos * dy + src_cy;

            let sample = sample_bilinear_zero(&input, src_x, src_y);
            for c in 0..4 {
                output[[y, x, c]] = sample[c].clamp(0.0, 255.0) as u8;
            }
        }
    }
    output
}

// ============================================================================
// Crop
// ============================================================================

/// Extract a sub-rectangle.
///
/// A rectangle extending past the image bounds is an explicit error, never
/// silently clamped.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `x` / `y` - Top-left corner of the rectangle
/// * `width` / `height` - Rectangle size, both positive
///
/// # Returns
/// The cropped image, or `FilterError::InvalidParameter`
pub fn crop(
    input: ArrayView3<u8>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<Array3<u8>, FilterError> {
    let (src_height, src_width, _) = input.dim();
    let right = x as usize + width as usize;
    let bottom = y as usize + height as usize;
    if width == 0 || height == 0 || right > src_width || bottom > src_height {
        return Err(FilterError::InvalidParameter(format!(
            "crop rect {}x{}+{}+{} exceeds image bounds {}x{}",
            width, height, x, y, src_width, src_height
        )));
    }

    let (x, y) = (x as usize, y as usize);
    let mut output = Array3::<u8>::zeros((height as usize, width as usize, 4));
    for oy in 0..height as usize {
        for ox in 0..width as usize {
            for c in 0..4 {
                output[[oy, ox, c]] = input[[y + oy, x + ox, c]];
            }
        }
    }
    Ok(output)
}

// ============================================================================
// Flip
// ============================================================================

/// Mirror the image along one or both axes.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `axis` - Horizontal, vertical, or both
///
/// # Returns
/// Flipped image with the same dimensions
pub fn flip(input: ArrayView3<u8>, axis: FlipAxis) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    let flip_x = matches!(axis, FlipAxis::Horizontal | FlipAxis::Both);
    let flip_y = matches!(axis, FlipAxis::Vertical | FlipAxis::Both);

    for y in 0..height {
        for x in 0..width {
            let sx = if flip_x { width - 1 - x } else { x };
            let sy = if flip_y { height - 1 - y } else { y };
            for c in 0..4 {
                output[[y, x, c]] = input[[sy, sx, c]];
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = (x * 7 % 256) as u8;
                img[[y, x, 1]] = (y * 11 % 256) as u8;
                img[[y, x, 2]] = ((x + y) % 256) as u8;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    // ========================================================================
    // Resize Tests
    // ========================================================================

    #[test]
    fn test_resize_exact_dimensions() {
        let img = gradient(13, 9);
        let result = resize(img.view(), 50, 50);
        assert_eq!(result.dim(), (50, 50, 4));
    }

    #[test]
    fn test_resize_uniform_color_survives() {
        let img = Array3::<u8>::from_elem((4, 4, 4), 77);
        let result = resize(img.view(), 9, 3);
        for v in result.iter() {
            assert_eq!(*v, 77);
        }
    }

    #[test]
    fn test_resolve_dims_preserves_aspect() {
        assert_eq!(resolve_resize_dims(200, 100, Some(50), None), (50, 25));
        assert_eq!(resolve_resize_dims(200, 100, None, Some(50)), (100, 50));
        assert_eq!(resolve_resize_dims(200, 100, Some(10), Some(90)), (10, 90));
    }

    // ========================================================================
    // Rotate Tests
    // ========================================================================

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let img = gradient(100, 50);
        let result = rotate(img.view(), 90.0);
        assert_eq!(result.dim(), (100, 50, 4));
    }

    #[test]
    fn test_rotate_270_swaps_dimensions() {
        let img = gradient(30, 20);
        let result = rotate(img.view(), 270.0);
        assert_eq!(result.dim(), (30, 20, 4));
    }

    #[test]
    fn test_rotate_45_grows_canvas() {
        let img = gradient(10, 10);
        let result = rotate(img.view(), 45.0);
        let (h, w, _) = result.dim();
        assert!(w > 10 && h > 10);
        // Corners of the grown canvas fall outside the source.
        assert_eq!(result[[0, 0, 3]], 0);
    }

    #[test]
    fn test_rotate_90_moves_pixels_correctly() {
        // 2x1 image: left pixel red, right pixel green. A 90 degree
        // rotation turns the row into a column; with this mapping the left
        // pixel lands on top.
        let mut img = Array3::<u8>::zeros((1, 2, 4));
        img[[0, 0, 0]] = 255;
        img[[0, 0, 3]] = 255;
        img[[0, 1, 1]] = 255;
        img[[0, 1, 3]] = 255;

        let result = rotate(img.view(), 90.0);
        assert_eq!(result.dim(), (2, 1, 4));
        assert_eq!(result[[0, 0, 0]], 255); // red on top
        assert_eq!(result[[1, 0, 1]], 255); // green below
    }

    // ========================================================================
    // Crop Tests
    // ========================================================================

    #[test]
    fn test_crop_extracts_rect() {
        let img = gradient(100, 100);
        let result = crop(img.view(), 10, 10, 50, 50).unwrap();
        assert_eq!(result.dim(), (50, 50, 4));
        assert_eq!(result[[0, 0, 0]], img[[10, 10, 0]]);
        assert_eq!(result[[49, 49, 1]], img[[59, 59, 1]]);
    }

    #[test]
    fn test_crop_out_of_bounds_is_error() {
        let img = gradient(20, 20);
        let err = crop(img.view(), 10, 10, 50, 50).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter(_)));
    }

    // ========================================================================
    // Flip Tests
    // ========================================================================

    #[test]
    fn test_flip_horizontal() {
        let img = gradient(5, 3);
        let result = flip(img.view(), FlipAxis::Horizontal);
        for y in 0..3 {
            for c in 0..4 {
                assert_eq!(result[[y, 0, c]], img[[y, 4, c]]);
            }
        }
    }

    #[test]
    fn test_flip_both_is_involution() {
        let img = gradient(6, 4);
        let once = flip(img.view(), FlipAxis::Both);
        let twice = flip(once.view(), FlipAxis::Both);
        assert_eq!(twice, img);
    }
}
