//! Confidence gate for classifier output
//!
//! Takes the top class of a probability vector and accepts it only when its
//! probability is strictly above the threshold. Rejected frames never vote.

use super::model::{Classifier, GestureMode};
use crate::error::{GestureError, Result};

/// Outcome of one gated classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted(usize),
    Rejected,
}

/// Confidence gate for one classifier mode
#[derive(Debug, Clone)]
pub struct ClassificationGate {
    mode: GestureMode,
    /// Exclusive lower bound on the top probability
    threshold: f32,
    /// Expected probability vector length, checked when known
    classes: Option<usize>,
}

impl ClassificationGate {
    pub fn new(mode: GestureMode, threshold: f32, classes: Option<usize>) -> Self {
        Self { mode, threshold, classes }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Run the classifier on `features` and gate its output
    pub async fn classify<C: Classifier>(
        &self,
        features: &[f32],
        classifier: &C,
    ) -> Result<Verdict> {
        let probabilities = classifier.predict(features).await?;
        self.decide(&probabilities)
    }

    /// Gate an already computed probability vector
    ///
    /// Ties go to the lowest index.
    pub fn decide(&self, probabilities: &[f32]) -> Result<Verdict> {
        if let Some(expected) = self.classes {
            if probabilities.len() != expected {
                return Err(GestureError::invocation(
                    self.mode,
                    format!("expected {} probabilities, got {}", expected, probabilities.len()),
                ));
            }
        }

        let mut best: Option<(usize, f32)> = None;
        for (index, &p) in probabilities.iter().enumerate() {
            if !p.is_finite() {
                return Err(GestureError::invocation(
                    self.mode,
                    format!("non-finite probability at index {}", index),
                ));
            }
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((index, p)),
            }
        }

        let (index, confidence) = best
            .ok_or_else(|| GestureError::invocation(self.mode, "empty probability vector"))?;

        let verdict = if confidence > self.threshold {
            Verdict::Accepted(index)
        } else {
            Verdict::Rejected
        };
        log::debug!(
            "{} top class {} p={:.3} (threshold {}) -> {:?}",
            self.mode, index, confidence, self.threshold, verdict
        );
        Ok(verdict)
    }
}
