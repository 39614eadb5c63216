//! Classifier seam and label tables
//!
//! Inference itself runs outside Rust (onnxruntime-web / TF.js on the page).
//! Rust only sees a function from a feature vector to class probabilities.

use std::fmt;

use crate::error::{GestureError, Result};

/// Which of the two classifiers a value belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// Single-frame hand pose
    Static,
    /// Fingertip trajectory over the point history
    Dynamic,
}

impl GestureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureMode::Static => "static",
            GestureMode::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for GestureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Black-box model: feature vector in, probability per class out
///
/// Any per-call resources (input/output tensors) must be released before
/// `predict` returns, whether it succeeds or not.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    async fn predict(&self, features: &[f32]) -> Result<Vec<f32>>;
}

/// Class index -> display name, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    mode: GestureMode,
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(mode: GestureMode, labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(GestureError::Configuration(format!("{} label table is empty", mode)));
        }
        Ok(Self { mode, labels })
    }

    /// Parse a JSON array of strings, e.g. `["Open", "Close", "Pointer"]`
    pub fn from_json(mode: GestureMode, json: &str) -> Result<Self> {
        let labels: Vec<String> = serde_json::from_str(json).map_err(|e| {
            GestureError::Configuration(format!("{} label table: {}", mode, e))
        })?;
        Self::new(mode, labels)
    }

    pub fn label(&self, index: usize) -> Result<&str> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(GestureError::IndexOutOfRange {
                mode: self.mode,
                index,
                len: self.labels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }
}
