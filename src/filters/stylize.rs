//! Stylize kernels: vignette, watercolor, oil painting.
//!
//! Artistic effects. Vignette and watercolor preserve alpha; oil painting
//! emits a fully opaque image by definition of the bucket filter.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::blur::gaussian_blur;
use super::color_adjust::{contrast, saturation};

// ============================================================================
// Vignette
// ============================================================================

/// Apply a radial vignette.
///
/// For a pixel at normalized distance `d` from the image center (distance
/// divided by the half-diagonal), each color channel is multiplied by
/// `1 - d^2 * intensity * radius`. The factor itself is deliberately left
/// unclamped; only the resulting channel value is clamped to 0-255, which
/// is what prevents wraparound for extreme parameter products.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `intensity` - Darkening strength, 0.0-1.0
/// * `radius` - Spread of the effect, 0.0-1.0
///
/// # Returns
/// Vignetted image, alpha preserved
pub fn vignette(input: ArrayView3<u8>, intensity: f32, radius: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let half_diagonal = (cx * cx + cy * cy).sqrt().max(1e-6);
    let strength = intensity * radius;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let d = (dx * dx + dy * dy).sqrt() / half_diagonal;
            let factor = 1.0 - d * d * strength;

            for c in 0..3 {
                let v = input[[y, x, c]] as f32 * factor;
                output[[y, x, c]] = v.clamp(0.0, 255.0) as u8;
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }
    output
}

// ============================================================================
// Watercolor
// ============================================================================

/// Apply a watercolor effect.
///
/// Gaussian blur for soft edges, then a fixed color boost: saturation x1.2
/// followed by contrast x1.1. Order matters and is blur-then-color-adjust.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `radius` - Blur radius (Gaussian sigma) for the soft-edge pass
///
/// # Returns
/// Stylized image with the same dimensions
pub fn watercolor(input: ArrayView3<u8>, radius: f32) -> Array3<u8> {
    let blurred = gaussian_blur(input, radius);
    let saturated = saturation(blurred.view(), 1.2);
    contrast(saturated.view(), 1.1)
}

// ============================================================================
// Oil Painting
// ============================================================================

/// Apply the posterized "oil painting" bucket filter.
///
/// For each output pixel the `(2*radius + 1)^2` neighborhood is scanned in
/// row-major order with edge-replicated sampling. Each neighbor's mean
/// intensity `(r + g + b) / 3` is quantized to `round(intensity * levels /
/// 255)`, and the output color is the mean RGB of the neighbors in the most
/// frequent bin. The mode is tracked while scanning: a bin wins only at the
/// moment its count becomes strictly greater than the current maximum, so
/// later bins that merely tie never displace it. This makes the output
/// byte-deterministic for identical inputs.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `radius` - Neighborhood half-width
/// * `levels` - Number of quantization bins, at least 1
///
/// # Returns
/// Stylized image with the same dimensions and alpha forced to 255
pub fn oil_painting(input: ArrayView3<u8>, radius: u32, levels: u32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let r = radius as isize;
    let levels = levels.max(1);
    // `round(255 * levels / 255)` reaches `levels`, so bins are 0..=levels.
    let bin_count = levels as usize + 1;

    let mut output = Array3::<u8>::zeros((height, width, 4));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let mut counts = vec![0u32; bin_count];
            let mut sums = vec![[0u64; 3]; bin_count];

            for x in 0..width {
                counts.fill(0);
                for s in sums.iter_mut() {
                    *s = [0; 3];
                }
                let mut max_count = 0u32;
                let mut mode_bin = 0usize;

                for dy in -r..=r {
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    for dx in -r..=r {
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;

                        let pr = input[[sy, sx, 0]] as u32;
                        let pg = input[[sy, sx, 1]] as u32;
                        let pb = input[[sy, sx, 2]] as u32;

                        let intensity = (pr + pg + pb) as f32 / 3.0;
                        let bin = (intensity * levels as f32 / 255.0).round() as usize;

                        counts[bin] += 1;
                        sums[bin][0] += pr as u64;
                        sums[bin][1] += pg as u64;
                        sums[bin][2] += pb as u64;

                        // First bin to exceed the running maximum wins;
                        // equal counts never displace the holder.
                        if counts[bin] > max_count {
                            max_count = counts[bin];
                            mode_bin = bin;
                        }
                    }
                }

                for c in 0..3 {
                    row[[x, c]] =
                        (sums[mode_bin][c] as f32 / max_count as f32).round() as u8;
                }
                row[[x, 3]] = 255;
            }
        });

    output
}
