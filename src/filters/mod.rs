//! Filter kernel library.
//!
//! Every kernel is a pure function `ArrayView3<u8> -> Array3<u8>` over RGBA
//! images of shape (height, width, 4). Kernels hold no shared state and are
//! safe to invoke concurrently on independent buffers. All channel
//! arithmetic clamps to 0-255 rather than wrapping, and the alpha channel
//! is preserved unless a kernel's definition says otherwise.
//!
//! ## Kernel Categories
//!
//! - **Tone**: grayscale, brightness, contrast, saturation, sepia, invert
//! - **Convolution**: gaussian blur
//! - **Stylize**: vignette, watercolor, oil painting
//! - **Geometry**: resize, rotate, crop, flip (the dimension-changing ones)
//! - **Compositing**: watermark, detection annotations

pub mod annotate;
pub mod blur;
pub mod color_adjust;
pub mod compose;
pub mod geometry;
pub mod grayscale;
pub mod stylize;

use crate::buffer::PixelBuffer;
use crate::codec;
use crate::error::FilterError;
use crate::request::FilterRequest;

/// Run the reference kernel for a request.
///
/// Parameters are validated against the input dimensions first; the kernel
/// library is safe to use standalone, without the fallback controller in
/// front of it.
pub fn run_kernel(input: PixelBuffer, request: &FilterRequest) -> Result<PixelBuffer, FilterError> {
    request.validate(input.width(), input.height())?;

    let view = input.view();
    let output = match request {
        FilterRequest::Grayscale => grayscale::grayscale(view),
        FilterRequest::Blur { sigma } => blur::gaussian_blur(view, *sigma),
        FilterRequest::Brightness { factor } => color_adjust::brightness(view, *factor),
        FilterRequest::Sepia => color_adjust::sepia(view),
        FilterRequest::Invert => color_adjust::invert(view),
        FilterRequest::Vignette { intensity, radius } => {
            stylize::vignette(view, *intensity, *radius)
        }
        FilterRequest::Watercolor { radius } => stylize::watercolor(view, *radius),
        FilterRequest::OilPainting { radius, levels } => {
            stylize::oil_painting(view, *radius, *levels)
        }
        FilterRequest::Contrast { factor } => color_adjust::contrast(view, *factor),
        FilterRequest::Saturation { factor } => color_adjust::saturation(view, *factor),
        FilterRequest::Resize { width, height } => {
            let (w, h) =
                geometry::resolve_resize_dims(input.width(), input.height(), *width, *height);
            geometry::resize(view, w, h)
        }
        FilterRequest::Rotate { degrees } => geometry::rotate(view, *degrees),
        FilterRequest::Crop {
            x,
            y,
            width,
            height,
        } => geometry::crop(view, *x, *y, *width, *height)?,
        FilterRequest::Flip { axis } => geometry::flip(view, *axis),
        FilterRequest::Watermark {
            overlay,
            x,
            y,
            opacity,
        } => {
            // A watermark that cannot be decoded is a caller mistake, not a
            // graceful-degradation case.
            let overlay = codec::decode(overlay).map_err(|e| {
                FilterError::InvalidParameter(format!("watermark overlay: {}", e))
            })?;
            compose::watermark(view, overlay.view(), *x, *y, *opacity)
        }
        FilterRequest::DrawDetections { detections } => {
            annotate::draw_detections(view, detections)
        }
    };
    Ok(PixelBuffer::from_array(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_kernel_dispatches_and_validates() {
        let input = PixelBuffer::new(4, 4);
        let out = run_kernel(input, &FilterRequest::Grayscale).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));

        let input = PixelBuffer::new(4, 4);
        let err = run_kernel(
            input,
            &FilterRequest::Crop {
                x: 2,
                y: 2,
                width: 10,
                height: 10,
            },
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter(_)));
    }

    #[test]
    fn test_run_kernel_geometry_changes_dimensions() {
        let input = PixelBuffer::new(10, 20);
        let out = run_kernel(
            input,
            &FilterRequest::Resize {
                width: Some(5),
                height: None,
            },
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (5, 10));
    }
}
