//! Classifier module - normalization, buffering, gating and vote smoothing
//!
//! Note: model inference runs in JavaScript (onnxruntime-web / TF.js).
//! Rust prepares the feature vectors and interprets the probabilities.

mod buffer;
mod gate;
mod model;
mod normalize;
mod vote;

pub use buffer::RingBuffer;
pub use gate::{ClassificationGate, Verdict};
pub use model::{Classifier, GestureMode, LabelTable};
pub use normalize::normalize;
pub use vote::VoteSmoother;
