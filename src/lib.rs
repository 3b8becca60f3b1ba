//! RasterFX
//!
//! Pixel-level image transformation library: an in-memory RGBA raster, a
//! JPEG/PNG codec boundary, a library of pure filter kernels, and a
//! byte-to-byte pipeline that tries an optional external accelerator before
//! falling back to the local kernels.
//!
//! ## Image Format
//! All kernels operate on RGBA rasters of shape (height, width, 4) with
//! 8-bit channels. Decoded inputs are always widened to RGBA; alpha is
//! dropped again only when encoding to JPEG.
//!
//! ## Layers
//! - [`buffer::PixelBuffer`] - the decoded raster
//! - [`codec`] - encoded bytes in, [`buffer::PixelBuffer`] out (and back)
//! - [`filters`] - pure kernels, one free function per operation
//! - [`accel`] - accelerator boundary and kernel fallback
//! - [`pipeline`] - decode once, run a request chain, encode once
//! - [`api::Engine`] - the async byte-to-byte surface
//!
//! ## Failure Policy
//! Filtering never destroys the caller's image: undecodable input comes
//! back unchanged. Only invalid parameters fail a call.

pub mod accel;
pub mod api;
pub mod buffer;
pub mod codec;
pub mod detect;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod request;

pub use accel::{AccelError, AccelResponse, Accelerator, FallbackController, NoAccelerator};
pub use api::Engine;
pub use buffer::PixelBuffer;
pub use codec::OutputFormat;
pub use detect::{
    BoundingBox, DetectedObject, DetectionDetail, DetectorError, Keypoint, ObjectDetector,
};
pub use error::FilterError;
pub use request::{FilterRequest, FlipAxis};
