//! Gesture Web - hand gesture classification for the browser
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The page runs MediaPipe Hands and the two models; this crate turns
//! landmarks into classifier input and classifier output into smoothed labels.

pub mod bridge;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod processor;

use wasm_bindgen::prelude::*;

pub use bridge::GestureRecognizer;
pub use error::{GestureError, Result};
pub use processor::{DynamicStatus, FrameProcessor, FrameReport, PipelineStats};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}
