//! Error model for the filter engine.
//!
//! A single enum carries every failure the image path can produce, so
//! callers can match on branches instead of parsing strings. Only
//! `InvalidParameter` is a hard failure on the boundary API; decode
//! failures degrade to "return the original bytes" in the pipeline.

/// Unified error type for decoding, encoding and filter invocation.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The input bytes could not be decoded as a supported image format.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The output buffer could not be encoded to the requested format.
    #[error("encode failed: {0}")]
    Encode(String),

    /// A filter parameter is out of range for the image it is applied to.
    /// This is the only error the boundary API surfaces for normal inputs.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A blocking worker task failed to complete on the async surface.
    #[error("worker task failed: {0}")]
    Task(String),
}
