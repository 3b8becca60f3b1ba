//! Detection boundary types.
//!
//! Object/face/pose detection is an external collaborator: the engine never
//! runs a detector, it only consumes detector output to draw annotations
//! (see `filters::annotate`). The per-detector extras that vary in shape
//! (face landmarks vs. OCR text vs. pose keypoints) are a tagged union
//! rather than an open-ended map, so each kind keeps typed fields under a
//! common label/confidence/bounding-box envelope.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A named point produced by face or pose detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Detector-specific payload carried alongside the common envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionDetail {
    /// Facial landmark positions (eyes, nose, mouth corners, ...).
    Face { landmarks: Vec<Keypoint> },
    /// Recognized text for OCR-style detectors.
    Text { text: String },
    /// Skeleton keypoints for pose detectors.
    Pose { keypoints: Vec<Keypoint> },
}

/// One detection result. Created by a detector, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetectionDetail>,
}

/// Error raised by an external detector implementation.
#[derive(Debug, thiserror::Error)]
#[error("detector failed: {0}")]
pub struct DetectorError(pub String);

/// External detection service.
///
/// Implementations are caller-owned resource handles: acquire one, pass it
/// where it is needed, and let `Drop` release the underlying session. The
/// engine never holds a detector beyond a single call.
pub trait ObjectDetector {
    /// Detect objects in an encoded image.
    fn detect_objects(&mut self, image: &[u8]) -> Result<Vec<DetectedObject>, DetectorError>;
}
