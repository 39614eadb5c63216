//! GestureRecognizer - the object the page drives once per camera frame
//!
//! Holds the whole pipeline (models, label tables, histories). JS constructs
//! it once after loading models and labels, then awaits `processFrame` for
//! every MediaPipe result before sending the next video frame.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::hand_landmarks::parse_hand;
use super::js_classifier::JsClassifier;
use crate::classifier::{GestureMode, LabelTable};
use crate::config::PipelineConfig;
use crate::error::GestureError;
use crate::logging;
use crate::processor::FrameProcessor;

type JsFrameProcessor = FrameProcessor<JsClassifier, JsClassifier>;

#[wasm_bindgen]
pub struct GestureRecognizer {
    processor: Rc<RefCell<JsFrameProcessor>>,
    landmark_count: usize,
}

#[wasm_bindgen]
impl GestureRecognizer {
    /// `static_labels` / `dynamic_labels` are the JSON label arrays; `config`
    /// is an optional JSON object overriding the defaults. Fails on any
    /// configuration problem.
    #[wasm_bindgen(constructor)]
    pub fn new(
        static_model: Function,
        dynamic_model: Function,
        static_labels: &str,
        dynamic_labels: &str,
        config: Option<String>,
    ) -> Result<GestureRecognizer, JsValue> {
        let config = match config {
            Some(json) => PipelineConfig::from_json(&json)?,
            None => PipelineConfig::default(),
        };
        logging::init(config.log_level);

        let static_labels = LabelTable::from_json(GestureMode::Static, static_labels)?;
        let dynamic_labels = LabelTable::from_json(GestureMode::Dynamic, dynamic_labels)?;
        let landmark_count = config.landmark_count;

        let processor = FrameProcessor::new(
            config,
            JsClassifier::new(GestureMode::Static, static_model),
            JsClassifier::new(GestureMode::Dynamic, dynamic_model),
            static_labels,
            dynamic_labels,
        )?;

        Ok(GestureRecognizer {
            processor: Rc::new(RefCell::new(processor)),
            landmark_count,
        })
    }

    /// Process one frame of hand landmarks
    ///
    /// `landmarks` holds `num_hands` hands of 21 (x, y) or (x, y, z) points.
    /// Resolves to `"STATIC: <label>"`, or `undefined` when the frame had no
    /// hand or was dropped. Rejects if the previous frame has not settled.
    #[wasm_bindgen(js_name = processFrame)]
    #[allow(clippy::await_holding_refcell_ref)]
    pub fn process_frame(&self, landmarks: Vec<f32>, num_hands: usize) -> Promise {
        let processor = Rc::clone(&self.processor);
        let landmark_count = self.landmark_count;

        future_to_promise(async move {
            // Held across the classifier awaits: one frame in flight at a time
            let mut processor = processor
                .try_borrow_mut()
                .map_err(|_| JsValue::from(GestureError::FrameInFlight))?;

            let hand = match parse_hand(&landmarks, num_hands, landmark_count) {
                Ok(hand) => hand,
                Err(e) => {
                    processor.reject_input(&e);
                    return Ok(JsValue::UNDEFINED);
                }
            };

            Ok(match processor.on_frame(hand.as_deref()).await {
                Some(output) => JsValue::from_str(&output),
                None => JsValue::UNDEFINED,
            })
        })
    }

    /// Current smoothed static label (`undefined` before the first vote or mid-frame)
    #[wasm_bindgen(js_name = staticLabel)]
    pub fn static_label(&self) -> Option<String> {
        let processor = self.processor.try_borrow().ok()?;
        let label = processor.static_label().ok()??;
        Some(label.to_string())
    }

    /// Current smoothed dynamic label (`undefined` before the first vote or mid-frame)
    #[wasm_bindgen(js_name = dynamicLabel)]
    pub fn dynamic_label(&self) -> Option<String> {
        let processor = self.processor.try_borrow().ok()?;
        let label = processor.dynamic_label().ok()??;
        Some(label.to_string())
    }

    /// Pipeline counters as a JSON string
    pub fn stats(&self) -> Option<String> {
        let processor = self.processor.try_borrow().ok()?;
        serde_json::to_string(&processor.stats()).ok()
    }
}
