//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_landmarks;
mod js_classifier;
mod recognizer;

pub use hand_landmarks::{parse_hand, INDEX_TIP};
pub use js_classifier::JsClassifier;
pub use recognizer::GestureRecognizer;
