//! JS bridge behaviour, run under wasm-bindgen-test (node)

#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use gesture_web::bridge::JsClassifier;
use gesture_web::classifier::{Classifier, GestureMode};
use gesture_web::{GestureError, GestureRecognizer};

const STATIC_LABELS: &str = r#"["Open", "Close"]"#;
const DYNAMIC_LABELS: &str = r#"["Stop", "Move"]"#;

fn dispose_counter() -> Object {
    let counter = Object::new();
    Reflect::set(&counter, &"disposed".into(), &0.into()).unwrap();
    counter
}

fn disposed(counter: &Object) -> f64 {
    Reflect::get(counter, &"disposed".into())
        .unwrap()
        .as_f64()
        .unwrap()
}

/// Model returning a tensor-like object; `data_body` is the body of `data()`
fn tensor_model(counter: &Object, data_body: &str) -> JsClassifier {
    let body = format!(
        "return {{ data: () => {{ {} }}, dispose: () => {{ counter.disposed += 1; }} }};",
        data_body
    );
    let predict =
        Function::new_with_args("counter, features", &body).bind1(&JsValue::NULL, counter);
    JsClassifier::new(GestureMode::Static, predict)
}

/// One held-still hand as MediaPipe (x, y, z) triplets
fn hand_frame() -> Vec<f32> {
    (0..21)
        .flat_map(|i| [0.4 + 0.04 * ((i + 3) / 4) as f32, 0.85 - 0.03 * i as f32, 0.0])
        .collect()
}

fn array_model(body: &str) -> Function {
    Function::new_with_args("features", body)
}

#[wasm_bindgen_test]
async fn test_tensor_disposed_after_read() {
    let counter = dispose_counter();
    let model = tensor_model(
        &counter,
        "return Promise.resolve(new Float32Array([0.25, 0.75]));",
    );
    let probabilities = model.predict(&[0.0, 1.0]).await.unwrap();
    assert_eq!(probabilities, vec![0.25, 0.75]);
    assert_eq!(disposed(&counter), 1.0);
}

#[wasm_bindgen_test]
async fn test_tensor_disposed_when_data_is_not_an_array() {
    let counter = dispose_counter();
    let model = tensor_model(&counter, "return 'not probabilities';");
    assert!(matches!(
        model.predict(&[0.0, 1.0]).await,
        Err(GestureError::ClassifierInvocation { mode: GestureMode::Static, .. })
    ));
    assert_eq!(disposed(&counter), 1.0);
}

#[wasm_bindgen_test]
async fn test_tensor_disposed_when_data_rejects() {
    let counter = dispose_counter();
    let model = tensor_model(&counter, "return Promise.reject(new Error('backend lost'));");
    assert!(matches!(
        model.predict(&[0.0, 1.0]).await,
        Err(GestureError::ClassifierInvocation { .. })
    ));
    assert_eq!(disposed(&counter), 1.0);
}

#[wasm_bindgen_test]
async fn test_overlapping_frame_is_rejected() {
    let slow = array_model(
        "return new Promise(resolve => \
         setTimeout(() => resolve(new Float32Array([0.9, 0.1])), 20));",
    );
    let fast = array_model("return new Float32Array([0.9, 0.1]);");
    let recognizer =
        GestureRecognizer::new(slow, fast, STATIC_LABELS, DYNAMIC_LABELS, None).unwrap();

    let first = recognizer.process_frame(hand_frame(), 1);
    let second = recognizer.process_frame(hand_frame(), 1);

    let err = JsFuture::from(second).await.unwrap_err();
    assert_eq!(err.as_string(), Some(GestureError::FrameInFlight.to_string()));
    let output = JsFuture::from(first).await.unwrap();
    assert_eq!(output.as_string().as_deref(), Some("STATIC: Open"));
}

#[wasm_bindgen_test]
async fn test_unparseable_frame_shows_in_stats() {
    let model = array_model("return new Float32Array([0.9, 0.1]);");
    let recognizer =
        GestureRecognizer::new(model.clone(), model, STATIC_LABELS, DYNAMIC_LABELS, None)
            .unwrap();

    let output = JsFuture::from(recognizer.process_frame(vec![0.5; 50], 1))
        .await
        .unwrap();
    assert!(output.is_undefined());

    let stats: serde_json::Value = serde_json::from_str(&recognizer.stats().unwrap()).unwrap();
    assert_eq!(stats["frames_seen"], 1);
    assert_eq!(stats["frames_dropped"], 1);
}
