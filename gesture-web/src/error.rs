//! Error types for the gesture pipeline
//!
//! Per-frame errors are caught at the frame boundary and the frame is dropped.
//! `Configuration` is only raised at startup and is fatal.

use wasm_bindgen::JsValue;
use crate::classifier::GestureMode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    /// Every coordinate coincides with the reference point
    #[error("cannot normalize: all points coincide with the reference point")]
    DivisionByZero,

    #[error("{mode} classifier failed: {reason}")]
    ClassifierInvocation { mode: GestureMode, reason: String },

    #[error("{mode} label index {index} out of range (table has {len} labels)")]
    IndexOutOfRange { mode: GestureMode, index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("malformed landmarks: expected {expected}, got {actual}")]
    MalformedLandmarks { expected: String, actual: String },

    #[error("previous frame is still being classified")]
    FrameInFlight,
}

impl GestureError {
    pub(crate) fn invocation(mode: GestureMode, reason: impl Into<String>) -> Self {
        GestureError::ClassifierInvocation { mode, reason: reason.into() }
    }
}

impl From<GestureError> for JsValue {
    fn from(err: GestureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for gesture operations
pub type Result<T> = std::result::Result<T, GestureError>;
