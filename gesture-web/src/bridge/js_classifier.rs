//! Classifier backed by a JavaScript function
//!
//! The page owns the model (onnxruntime-web or TF.js). It passes Rust a
//! function `(features: Float32Array) => result`, where result may be:
//! - a Float32Array or plain array of probabilities
//! - a Promise of either
//! - a tensor-like object whose `data()` yields either (sync or Promise)
//!
//! Tensor-like results are disposed as soon as the probabilities are read.

use js_sys::{Array, ArrayBuffer, Float32Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::classifier::{Classifier, GestureMode};
use crate::error::{GestureError, Result};

pub struct JsClassifier {
    mode: GestureMode,
    predict: Function,
}

impl JsClassifier {
    pub fn new(mode: GestureMode, predict: Function) -> Self {
        Self { mode, predict }
    }

    fn fail(&self, err: &JsValue) -> GestureError {
        GestureError::invocation(self.mode, describe(err))
    }

    /// Await `value` if it is a Promise, otherwise pass it through
    async fn settle(&self, value: JsValue) -> Result<JsValue> {
        match value.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(|e| self.fail(&e)),
            Err(value) => Ok(value),
        }
    }
}

impl Classifier for JsClassifier {
    async fn predict(&self, features: &[f32]) -> Result<Vec<f32>> {
        let input = Float32Array::from(features);
        let output = self
            .predict
            .call1(&JsValue::NULL, &input)
            .map_err(|e| self.fail(&e))?;
        let output = TensorGuard::new(self.settle(output).await?);

        let data = match method(output.value(), "data") {
            Some(data) => {
                let values = data.call0(output.value()).map_err(|e| self.fail(&e))?;
                self.settle(values).await?
            }
            None => output.value().clone(),
        };

        // Any typed array width or a plain array
        if !ArrayBuffer::is_view(&data) && !Array::is_array(&data) {
            return Err(GestureError::invocation(
                self.mode,
                format!("expected an array of probabilities, got {}", describe(&data)),
            ));
        }
        Ok(Float32Array::new(&data).to_vec())
    }
}

/// Calls `dispose()` on a tensor-like result when dropped
struct TensorGuard {
    value: JsValue,
}

impl TensorGuard {
    fn new(value: JsValue) -> Self {
        Self { value }
    }

    fn value(&self) -> &JsValue {
        &self.value
    }
}

impl Drop for TensorGuard {
    fn drop(&mut self) {
        if let Some(dispose) = method(&self.value, "dispose") {
            if let Err(e) = dispose.call0(&self.value) {
                log::warn!("tensor dispose failed: {}", describe(&e));
            }
        }
    }
}

/// Look up `obj[name]` if it is a function
fn method(obj: &JsValue, name: &str) -> Option<Function> {
    if !obj.is_object() {
        return None;
    }
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
