//! Boundary API: one async byte-to-byte entry point per filter.
//!
//! Every method takes encoded image bytes and returns encoded image bytes,
//! offloading the blocking decode/kernel/encode work to a worker thread.
//! Per the engine's failure policy, bytes always come back for normal
//! inputs (the original bytes when decoding fails); only invalid
//! parameters fail the call.

use std::sync::Arc;

use crate::accel::{Accelerator, FallbackController, NoAccelerator};
use crate::codec::OutputFormat;
use crate::detect::DetectedObject;
use crate::error::FilterError;
use crate::pipeline;
use crate::request::{FilterRequest, FlipAxis};

/// Filter engine handle.
///
/// Owns the accelerator handle explicitly; there are no process-wide
/// singletons. Cloning is cheap and clones share the accelerator.
#[derive(Clone)]
pub struct Engine {
    controller: Arc<FallbackController>,
    format: OutputFormat,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine without an accelerator, encoding to JPEG.
    pub fn new() -> Self {
        Self::with_accelerator(Arc::new(NoAccelerator))
    }

    /// Engine that tries the given accelerator before the local kernels.
    pub fn with_accelerator(accelerator: Arc<dyn Accelerator>) -> Self {
        Self {
            controller: Arc::new(FallbackController::new(accelerator)),
            format: OutputFormat::default(),
        }
    }

    /// Select the output encoding (default JPEG; PNG keeps alpha).
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run an arbitrary chain of filter requests.
    pub async fn run(
        &self,
        image: Vec<u8>,
        requests: Vec<FilterRequest>,
    ) -> Result<Vec<u8>, FilterError> {
        let controller = Arc::clone(&self.controller);
        let format = self.format;
        tokio::task::spawn_blocking(move || pipeline::run(&controller, &image, &requests, format))
            .await
            .map_err(|e| FilterError::Task(e.to_string()))?
    }

    async fn apply(&self, image: Vec<u8>, request: FilterRequest) -> Result<Vec<u8>, FilterError> {
        self.run(image, vec![request]).await
    }

    // ========================================================================
    // Tone Filters
    // ========================================================================

    pub async fn apply_grayscale(&self, image: Vec<u8>) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Grayscale).await
    }

    pub async fn apply_brightness(
        &self,
        image: Vec<u8>,
        factor: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Brightness { factor }).await
    }

    pub async fn apply_contrast(
        &self,
        image: Vec<u8>,
        factor: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Contrast { factor }).await
    }

    pub async fn apply_saturation(
        &self,
        image: Vec<u8>,
        factor: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Saturation { factor }).await
    }

    pub async fn apply_sepia(&self, image: Vec<u8>) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Sepia).await
    }

    pub async fn apply_invert(&self, image: Vec<u8>) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Invert).await
    }

    // ========================================================================
    // Convolution & Stylize Filters
    // ========================================================================

    pub async fn apply_blur(&self, image: Vec<u8>, sigma: f32) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Blur { sigma }).await
    }

    pub async fn apply_vignette(
        &self,
        image: Vec<u8>,
        intensity: f32,
        radius: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Vignette { intensity, radius })
            .await
    }

    pub async fn apply_watercolor(
        &self,
        image: Vec<u8>,
        radius: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Watercolor { radius }).await
    }

    pub async fn apply_oil_painting(
        &self,
        image: Vec<u8>,
        radius: u32,
        levels: u32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::OilPainting { radius, levels })
            .await
    }

    // ========================================================================
    // Geometry Filters
    // ========================================================================

    pub async fn apply_resize(
        &self,
        image: Vec<u8>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Resize { width, height })
            .await
    }

    pub async fn apply_rotate(
        &self,
        image: Vec<u8>,
        degrees: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Rotate { degrees }).await
    }

    pub async fn apply_crop(
        &self,
        image: Vec<u8>,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(
            image,
            FilterRequest::Crop {
                x,
                y,
                width,
                height,
            },
        )
        .await
    }

    pub async fn apply_flip(
        &self,
        image: Vec<u8>,
        axis: FlipAxis,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::Flip { axis }).await
    }

    // ========================================================================
    // Compositing Filters
    // ========================================================================

    pub async fn apply_watermark(
        &self,
        image: Vec<u8>,
        overlay: Vec<u8>,
        x: i64,
        y: i64,
        opacity: f32,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(
            image,
            FilterRequest::Watermark {
                overlay,
                x,
                y,
                opacity,
            },
        )
        .await
    }

    pub async fn draw_detections(
        &self,
        image: Vec<u8>,
        detections: Vec<DetectedObject>,
    ) -> Result<Vec<u8>, FilterError> {
        self.apply(image, FilterRequest::DrawDetections { detections })
            .await
    }
}
