//! Gaussian blur kernel.
//!
//! Separable two-pass convolution, mathematically identical to convolving
//! with the full 2D product kernel. Border pixels use clamped
//! (edge-replicated) sampling. Rows are processed in parallel.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

/// Build a normalized 1D Gaussian kernel with radius `round(sigma)`.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
///
/// # Returns
/// Kernel of length `2 * round(sigma) + 1` whose weights sum to 1;
/// a single-tap identity kernel when the radius rounds to zero
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = sigma.round() as i64;
    if radius <= 0 {
        return vec![1.0];
    }

    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| {
            let x = i as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

/// Apply Gaussian blur to an RGBA image.
///
/// All four channels are blurred, including alpha.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `sigma` - Standard deviation; radius is `round(sigma)`
///
/// # Returns
/// Blurred image with the same dimensions
pub fn gaussian_blur(input: ArrayView3<u8>, sigma: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let kernel = gaussian_kernel(sigma);
    if kernel.len() == 1 {
        // Radius rounds to zero: no blur.
        return input.to_owned();
    }
    let half = kernel.len() / 2;

    // Work in f32 between passes for precision.
    let mut temp = Array3::<f32>::zeros((height, width, channels));

    // Horizontal pass; rows are independent.
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sx = (x as isize + ki as isize - half as isize)
                            .clamp(0, width as isize - 1) as usize;
                        sum += input[[y, sx, c]] as f32 * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Vertical pass.
    let temp_view = temp.view();
    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half as isize)
                            .clamp(0, height as isize - 1) as usize;
                        sum += temp_view[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = sum.clamp(0.0, 255.0) as u8;
                }
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized_and_sized() {
        let kernel = gaussian_kernel(2.0);
        assert_eq!(kernel.len(), 5); // 2 * round(2.0) + 1
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        // Symmetric around the center tap.
        assert!((kernel[0] - kernel[4]).abs() < 1e-6);
        assert!(kernel[2] > kernel[1]);
    }

    #[test]
    fn test_tiny_sigma_is_identity() {
        let mut img = Array3::<u8>::zeros((2, 2, 4));
        img[[0, 0, 0]] = 200;
        img[[1, 1, 2]] = 30;
        let result = gaussian_blur(img.view(), 0.3);
        assert_eq!(result, img);
    }

    #[test]
    fn test_blur_preserves_shape_and_uniform_color() {
        let mut img = Array3::<u8>::zeros((5, 7, 4));
        for y in 0..5 {
            for x in 0..7 {
                img[[y, x, 0]] = 90;
                img[[y, x, 3]] = 255;
            }
        }
        let result = gaussian_blur(img.view(), 1.5);
        assert_eq!(result.dim(), (5, 7, 4));
        // A uniform image is a fixed point of blurring (edge replication
        // keeps the border average identical).
        for y in 0..5 {
            for x in 0..7 {
                assert!((result[[y, x, 0]] as i32 - 90).abs() <= 1);
                assert_eq!(result[[y, x, 3]], 255);
            }
        }
    }

    #[test]
    fn test_blur_smooths_an_impulse() {
        let mut img = Array3::<u8>::zeros((5, 5, 4));
        img[[2, 2, 1]] = 255;
        let result = gaussian_blur(img.view(), 1.0);
        // Energy spreads to the neighbors and the peak drops.
        assert!(result[[2, 2, 1]] < 255);
        assert!(result[[2, 1, 1]] > 0);
        assert!(result[[1, 2, 1]] > 0);
    }
}
