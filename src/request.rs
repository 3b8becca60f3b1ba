//! Filter invocation requests.
//!
//! A `FilterRequest` names one operation plus its typed parameters. It is an
//! immutable value: the caller builds one, the engine consumes it once.
//! Requests serialize to a tagged JSON object, which doubles as the
//! named-operation + parameter-mapping wire shape on the accelerator
//! boundary.

use serde::{Deserialize, Serialize};

use crate::detect::DetectedObject;
use crate::error::FilterError;

/// Mirror axis for the flip kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
    Both,
}

/// One named filter operation with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterRequest {
    Grayscale,
    Blur {
        /// Gaussian standard deviation; the kernel radius is `round(sigma)`.
        sigma: f32,
    },
    Brightness {
        /// `-1.0..=1.0`, mapped to an additive offset of `factor * 100`.
        factor: f32,
    },
    Sepia,
    Invert,
    Vignette {
        /// Darkening strength, `0.0..=1.0`.
        intensity: f32,
        /// Spread of the effect, `0.0..=1.0`.
        radius: f32,
    },
    Watercolor {
        /// Blur radius used for the soft-edge pass.
        radius: f32,
    },
    OilPainting {
        /// Neighborhood half-width; the scan window is `2*radius + 1` square.
        radius: u32,
        /// Number of intensity quantization bins, at least 1.
        levels: u32,
    },
    Contrast {
        /// Multiplicative factor around mid-gray, `1.0` = neutral.
        factor: f32,
    },
    Saturation {
        /// HSL saturation multiplier, `1.0` = neutral.
        factor: f32,
    },
    Resize {
        /// Target width; derived from `height` preserving aspect if absent.
        width: Option<u32>,
        /// Target height; derived from `width` preserving aspect if absent.
        height: Option<u32>,
    },
    Rotate {
        /// Rotation about the image center, in degrees.
        degrees: f32,
    },
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    Flip {
        axis: FlipAxis,
    },
    Watermark {
        /// Encoded (JPEG/PNG) watermark image.
        overlay: Vec<u8>,
        /// Horizontal offset of the overlay; may be negative (clipped).
        x: i64,
        /// Vertical offset of the overlay; may be negative (clipped).
        y: i64,
        /// Scales the overlay's alpha channel before compositing, `0.0..=1.0`.
        opacity: f32,
    },
    DrawDetections {
        detections: Vec<DetectedObject>,
    },
}

impl FilterRequest {
    /// Stable operation name used on the accelerator boundary.
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterRequest::Grayscale => "grayscale",
            FilterRequest::Blur { .. } => "blur",
            FilterRequest::Brightness { .. } => "brightness",
            FilterRequest::Sepia => "sepia",
            FilterRequest::Invert => "invert",
            FilterRequest::Vignette { .. } => "vignette",
            FilterRequest::Watercolor { .. } => "watercolor",
            FilterRequest::OilPainting { .. } => "oil_painting",
            FilterRequest::Contrast { .. } => "contrast",
            FilterRequest::Saturation { .. } => "saturation",
            FilterRequest::Resize { .. } => "resize",
            FilterRequest::Rotate { .. } => "rotate",
            FilterRequest::Crop { .. } => "crop",
            FilterRequest::Flip { .. } => "flip",
            FilterRequest::Watermark { .. } => "watermark",
            FilterRequest::DrawDetections { .. } => "draw_detections",
        }
    }

    /// Parameter mapping for the accelerator boundary: the serialized
    /// request minus its operation tag.
    pub fn params(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("op");
                map
            }
            // Tagged enum serialization always yields an object.
            _ => serde_json::Map::new(),
        }
    }

    /// Check parameters against the image the request will be applied to.
    ///
    /// Out-of-range parameters fail explicitly; they are never silently
    /// clamped. Validation runs before any accelerator attempt, so both
    /// execution paths see identical parameter policy.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), FilterError> {
        match *self {
            FilterRequest::Grayscale
            | FilterRequest::Sepia
            | FilterRequest::Invert
            | FilterRequest::Flip { .. }
            | FilterRequest::DrawDetections { .. } => Ok(()),

            FilterRequest::Blur { sigma } => {
                if !sigma.is_finite() || sigma < 0.0 {
                    return Err(FilterError::InvalidParameter(format!(
                        "blur sigma must be finite and non-negative, got {}",
                        sigma
                    )));
                }
                Ok(())
            }

            FilterRequest::Brightness { factor } => {
                if !factor.is_finite() || !(-1.0..=1.0).contains(&factor) {
                    return Err(FilterError::InvalidParameter(format!(
                        "brightness factor must be in [-1, 1], got {}",
                        factor
                    )));
                }
                Ok(())
            }

            FilterRequest::Vignette { intensity, radius } => {
                for (name, v) in [("intensity", intensity), ("radius", radius)] {
                    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                        return Err(FilterError::InvalidParameter(format!(
                            "vignette {} must be in [0, 1], got {}",
                            name, v
                        )));
                    }
                }
                Ok(())
            }

            FilterRequest::Watercolor { radius } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(FilterError::InvalidParameter(format!(
                        "watercolor radius must be finite and non-negative, got {}",
                        radius
                    )));
                }
                Ok(())
            }

            FilterRequest::OilPainting { levels, .. } => {
                if levels == 0 {
                    return Err(FilterError::InvalidParameter(
                        "oil painting levels must be at least 1".to_string(),
                    ));
                }
                Ok(())
            }

            FilterRequest::Contrast { factor } | FilterRequest::Saturation { factor } => {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(FilterError::InvalidParameter(format!(
                        "{} factor must be finite and non-negative, got {}",
                        self.op_name(),
                        factor
                    )));
                }
                Ok(())
            }

            FilterRequest::Resize {
                width: w,
                height: h,
            } => {
                if w.is_none() && h.is_none() {
                    return Err(FilterError::InvalidParameter(
                        "resize requires at least one target dimension".to_string(),
                    ));
                }
                if w == Some(0) || h == Some(0) {
                    return Err(FilterError::InvalidParameter(
                        "resize dimensions must be positive".to_string(),
                    ));
                }
                Ok(())
            }

            FilterRequest::Rotate { degrees } => {
                if !degrees.is_finite() {
                    return Err(FilterError::InvalidParameter(format!(
                        "rotate angle must be finite, got {}",
                        degrees
                    )));
                }
                Ok(())
            }

            FilterRequest::Crop {
                x,
                y,
                width: w,
                height: h,
            } => {
                if w == 0 || h == 0 {
                    return Err(FilterError::InvalidParameter(
                        "crop dimensions must be positive".to_string(),
                    ));
                }
                let in_bounds = x
                    .checked_add(w)
                    .is_some_and(|right| right <= width)
                    && y.checked_add(h).is_some_and(|bottom| bottom <= height);
                if !in_bounds {
                    return Err(FilterError::InvalidParameter(format!(
                        "crop rect {}x{}+{}+{} exceeds image bounds {}x{}",
                        w, h, x, y, width, height
                    )));
                }
                Ok(())
            }

            FilterRequest::Watermark { opacity, .. } => {
                if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
                    return Err(FilterError::InvalidParameter(format!(
                        "watermark opacity must be in [0, 1], got {}",
                        opacity
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_name_and_params() {
        let req = FilterRequest::Blur { sigma: 2.5 };
        assert_eq!(req.op_name(), "blur");
        let params = req.params();
        assert_eq!(params.get("sigma").and_then(|v| v.as_f64()), Some(2.5));
        assert!(!params.contains_key("op"));
    }

    #[test]
    fn test_unit_variant_has_empty_params() {
        assert!(FilterRequest::Grayscale.params().is_empty());
    }

    #[test]
    fn test_crop_bounds_validation() {
        let req = FilterRequest::Crop {
            x: 10,
            y: 10,
            width: 50,
            height: 50,
        };
        assert!(req.validate(100, 100).is_ok());
        assert!(matches!(
            req.validate(59, 100),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_resize_requires_a_dimension() {
        let req = FilterRequest::Resize {
            width: None,
            height: None,
        };
        assert!(req.validate(10, 10).is_err());
        let req = FilterRequest::Resize {
            width: Some(0),
            height: Some(5),
        };
        assert!(req.validate(10, 10).is_err());
    }

    #[test]
    fn test_brightness_range() {
        assert!(FilterRequest::Brightness { factor: 1.5 }
            .validate(1, 1)
            .is_err());
        assert!(FilterRequest::Brightness { factor: -1.0 }
            .validate(1, 1)
            .is_ok());
    }
}
