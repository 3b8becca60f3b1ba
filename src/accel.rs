//! Accelerator boundary and fallback controller.
//!
//! An accelerator is an external, possibly platform-native implementation
//! of the filter operations, tried opportunistically before the reference
//! kernels. The controller models this as capability-checked strategy
//! selection, not exception-driven control flow: ask the accelerator, and
//! on "not handled", any error, or an unusable result, silently run the
//! local kernel. Fallback is an internal resilience policy and is never
//! surfaced to callers as an error.

use std::sync::Arc;

use crate::buffer::PixelBuffer;
use crate::codec::{self, OutputFormat};
use crate::error::FilterError;
use crate::filters;
use crate::request::FilterRequest;

/// Error raised inside an accelerator. Always absorbed by the controller.
#[derive(Debug, thiserror::Error)]
#[error("accelerator unavailable: {0}")]
pub struct AccelError(pub String);

/// Outcome of an accelerator invocation.
#[derive(Debug)]
pub enum AccelResponse {
    /// The accelerator produced re-encoded image bytes.
    Handled(Vec<u8>),
    /// The accelerator does not implement this operation.
    NotHandled,
}

/// External accelerator boundary: a named-operation call with a parameter
/// mapping and encoded image bytes.
///
/// Implementations must return promptly from the caller's perspective; a
/// host without an accelerator channel reports `supports` as false (the
/// default) so the controller falls back immediately instead of waiting.
pub trait Accelerator: Send + Sync {
    /// Whether the accelerator implements the named operation at all.
    /// Skips the encode/call/decode round-trip when it cannot help.
    fn supports(&self, _op: &str) -> bool {
        false
    }

    /// Attempt the named operation.
    fn apply(
        &self,
        op: &str,
        params: &serde_json::Map<String, serde_json::Value>,
        image: &[u8],
    ) -> Result<AccelResponse, AccelError>;
}

/// Default accelerator for hosts without one: supports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAccelerator;

impl Accelerator for NoAccelerator {
    fn apply(
        &self,
        _op: &str,
        _params: &serde_json::Map<String, serde_json::Value>,
        _image: &[u8],
    ) -> Result<AccelResponse, AccelError> {
        Ok(AccelResponse::NotHandled)
    }
}

/// Per-invocation strategy selector: try the accelerator, else run the
/// reference kernel. Every operation is wrapped identically.
pub struct FallbackController {
    accelerator: Arc<dyn Accelerator>,
}

impl FallbackController {
    pub fn new(accelerator: Arc<dyn Accelerator>) -> Self {
        Self { accelerator }
    }

    /// Apply one filter request to a decoded buffer.
    ///
    /// Parameter validation runs before any accelerator attempt, so invalid
    /// parameters fail identically on both paths. An accelerator result is
    /// authoritative when it decodes; everything else falls back.
    pub fn apply(
        &self,
        input: PixelBuffer,
        request: &FilterRequest,
    ) -> Result<PixelBuffer, FilterError> {
        request.validate(input.width(), input.height())?;

        if self.accelerator.supports(request.op_name()) {
            if let Some(result) = self.try_accelerator(&input, request) {
                return Ok(result);
            }
        }
        filters::run_kernel(input, request)
    }

    /// One accelerator attempt; `None` means "fall back", whatever the cause.
    fn try_accelerator(&self, input: &PixelBuffer, request: &FilterRequest) -> Option<PixelBuffer> {
        let op = request.op_name();

        // PNG keeps the round-trip lossless, so accelerator output and
        // kernel output stay comparable byte for byte.
        let encoded = match codec::encode(input, OutputFormat::Png) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("accelerator skipped for {}: encode failed: {}", op, e);
                return None;
            }
        };

        match self.accelerator.apply(op, &request.params(), &encoded) {
            Ok(AccelResponse::Handled(bytes)) => match codec::decode(&bytes) {
                Ok(buffer) => Some(buffer),
                Err(e) => {
                    log::debug!("accelerator result for {} unusable, falling back: {}", op, e);
                    None
                }
            },
            Ok(AccelResponse::NotHandled) => {
                log::debug!("accelerator did not handle {}, falling back", op);
                None
            }
            Err(e) => {
                log::debug!("accelerator failed for {}, falling back: {}", op, e);
                None
            }
        }
    }
}

impl Default for FallbackController {
    fn default() -> Self {
        Self::new(Arc::new(NoAccelerator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Claims support but always errors, to exercise the silent fallback.
    struct FlakyAccelerator;

    impl Accelerator for FlakyAccelerator {
        fn supports(&self, _op: &str) -> bool {
            true
        }

        fn apply(
            &self,
            _op: &str,
            _params: &serde_json::Map<String, serde_json::Value>,
            _image: &[u8],
        ) -> Result<AccelResponse, AccelError> {
            Err(AccelError("channel closed".to_string()))
        }
    }

    /// Handles exactly one op by returning a fixed 1x1 red PNG.
    struct RedAccelerator {
        red_png: Vec<u8>,
    }

    impl RedAccelerator {
        fn new() -> Self {
            let red = PixelBuffer::from_raw(1, 1, vec![255, 0, 0, 255]).unwrap();
            Self {
                red_png: codec::encode(&red, OutputFormat::Png).unwrap(),
            }
        }
    }

    impl Accelerator for RedAccelerator {
        fn supports(&self, op: &str) -> bool {
            op == "invert"
        }

        fn apply(
            &self,
            op: &str,
            _params: &serde_json::Map<String, serde_json::Value>,
            _image: &[u8],
        ) -> Result<AccelResponse, AccelError> {
            if op == "invert" {
                Ok(AccelResponse::Handled(self.red_png.clone()))
            } else {
                Ok(AccelResponse::NotHandled)
            }
        }
    }

    #[test]
    fn test_failing_accelerator_falls_back_silently() {
        let controller = FallbackController::new(Arc::new(FlakyAccelerator));
        let input = PixelBuffer::from_raw(1, 1, vec![10, 20, 30, 255]).unwrap();
        let direct = filters::run_kernel(input.clone(), &FilterRequest::Invert).unwrap();
        let result = controller.apply(input, &FilterRequest::Invert).unwrap();
        assert_eq!(result, direct);
    }

    #[test]
    fn test_handled_result_is_authoritative() {
        let controller = FallbackController::new(Arc::new(RedAccelerator::new()));
        let input = PixelBuffer::from_raw(1, 1, vec![10, 20, 30, 255]).unwrap();
        let result = controller.apply(input, &FilterRequest::Invert).unwrap();
        // The accelerator's answer wins even though the kernel would differ.
        assert_eq!(result.pixel(0, 0), (255, 0, 0, 255));
    }

    #[test]
    fn test_invalid_parameters_fail_before_accelerator() {
        let controller = FallbackController::new(Arc::new(RedAccelerator::new()));
        let input = PixelBuffer::new(4, 4);
        let err = controller
            .apply(
                input,
                &FilterRequest::Crop {
                    x: 0,
                    y: 0,
                    width: 99,
                    height: 99,
                },
            )
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter(_)));
    }
}
