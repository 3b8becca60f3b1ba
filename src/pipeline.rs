//! Byte-to-byte filter pipeline.
//!
//! Decode once at entry, run every stage on the decoded buffer, encode once
//! at exit. Callers who prefer to chain independently-invoked top-level
//! operations can instead feed each call's output bytes into the next; both
//! styles compose the same kernels.

use crate::accel::FallbackController;
use crate::codec::{self, OutputFormat};
use crate::error::FilterError;
use crate::request::FilterRequest;

/// Run an ordered chain of filter requests over encoded image bytes.
///
/// Failure policy:
/// - Undecodable input degrades gracefully: the original bytes come back
///   unchanged (with a warning log), never an error. The caller's data is
///   never destroyed.
/// - A stage failure (invalid parameters) aborts the pipeline and surfaces;
///   partial results are discarded. There is no rollback.
pub fn run(
    controller: &FallbackController,
    bytes: &[u8],
    requests: &[FilterRequest],
    format: OutputFormat,
) -> Result<Vec<u8>, FilterError> {
    let mut buffer = match codec::decode(bytes) {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("input could not be decoded, returning it unchanged: {}", e);
            return Ok(bytes.to_vec());
        }
    };

    for request in requests {
        buffer = controller.apply(buffer, request)?;
    }

    codec::encode(&buffer, format)
}
