//! Watermark compositing kernel.
//!
//! Source-over alpha blending of an overlay buffer onto a base image at an
//! integer offset. The `opacity` parameter scales the overlay's alpha
//! channel before blending, never after.

use ndarray::{Array3, ArrayView3};

/// Alpha-composite `overlay` onto `base` at offset `(x, y)`.
///
/// Offsets may be negative; overlay regions falling outside the base are
/// clipped. Blending is non-premultiplied source-over on every channel,
/// with the composite alpha written back so PNG output keeps translucency.
///
/// # Arguments
/// * `base` - RGBA image of shape (height, width, 4)
/// * `overlay` - RGBA watermark image
/// * `x` / `y` - Overlay placement relative to the base origin
/// * `opacity` - 0.0-1.0 multiplier applied to the overlay alpha first
///
/// # Returns
/// Composited image with the base dimensions
pub fn watermark(
    base: ArrayView3<u8>,
    overlay: ArrayView3<u8>,
    x: i64,
    y: i64,
    opacity: f32,
) -> Array3<u8> {
    let (base_h, base_w, _) = base.dim();
    let (over_h, over_w, _) = overlay.dim();

    let mut output = base.to_owned();
    let opacity = opacity.clamp(0.0, 1.0);

    for oy in 0..over_h {
        let by = y + oy as i64;
        if by < 0 || by >= base_h as i64 {
            continue;
        }
        for ox in 0..over_w {
            let bx = x + ox as i64;
            if bx < 0 || bx >= base_w as i64 {
                continue;
            }
            let (bx, by) = (bx as usize, by as usize);

            // Opacity scales the source alpha before any blending math.
            let src_a = overlay[[oy, ox, 3]] as f32 / 255.0 * opacity;
            if src_a <= 0.0 {
                continue;
            }
            let dst_a = output[[by, bx, 3]] as f32 / 255.0;
            let out_a = src_a + dst_a * (1.0 - src_a);

            for c in 0..3 {
                let src = overlay[[oy, ox, c]] as f32;
                let dst = output[[by, bx, c]] as f32;
                let blended = if out_a > 0.0 {
                    (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a
                } else {
                    0.0
                };
                output[[by, bx, c]] = blended.clamp(0.0, 255.0) as u8;
            }
            output[[by, bx, 3]] = (out_a * 255.0).clamp(0.0, 255.0) as u8;
        }
    }
    output
}
