//! Per-frame orchestration of the static and dynamic gesture paths
//!
//! One `FrameProcessor` owns every piece of mutable pipeline state: the
//! fingertip history, both vote histories and both classifiers. Frames are
//! processed strictly one at a time; `&mut self` across the classifier awaits
//! keeps a later frame from interleaving with an earlier one.

use std::fmt;

use nalgebra::Point2;
use serde::Serialize;

use crate::classifier::{
    normalize, ClassificationGate, Classifier, GestureMode, LabelTable, RingBuffer, Verdict,
    VoteSmoother,
};
use crate::config::{PipelineConfig, UNKNOWN_LABEL};
use crate::error::{GestureError, Result};

/// What happened on the dynamic path for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicStatus {
    /// Point history not full yet
    Pending { buffered: usize },
    Classified(Verdict),
    /// Dynamic classification failed; the static label was still emitted
    Failed(GestureError),
}

/// Result of one processed frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub static_verdict: Verdict,
    /// Smoothed static label, or `UNKNOWN_LABEL` before the first accepted vote
    pub static_label: String,
    pub dynamic: DynamicStatus,
    /// Smoothed dynamic label, `None` before the first accepted vote
    pub dynamic_label: Option<String>,
}

/// Output surface text: `STATIC: <label>`
impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STATIC: {}", self.static_label)
    }
}

/// Running counters for the debug overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub frames_seen: u64,
    pub frames_without_hand: u64,
    pub frames_dropped: u64,
    pub static_accepted: u64,
    pub static_rejected: u64,
    pub dynamic_runs: u64,
    pub dynamic_accepted: u64,
    pub dynamic_failed: u64,
}

pub struct FrameProcessor<S, D> {
    config: PipelineConfig,

    static_model: S,
    static_gate: ClassificationGate,
    static_labels: LabelTable,
    static_votes: VoteSmoother,

    dynamic_model: D,
    dynamic_gate: ClassificationGate,
    dynamic_labels: LabelTable,
    dynamic_votes: VoteSmoother,

    /// Tracked fingertip positions, oldest first
    point_history: RingBuffer<Point2<f32>>,

    stats: PipelineStats,
}

impl<S: Classifier, D: Classifier> FrameProcessor<S, D> {
    /// Build the pipeline. Any configuration problem is fatal here.
    pub fn new(
        config: PipelineConfig,
        static_model: S,
        dynamic_model: D,
        static_labels: LabelTable,
        dynamic_labels: LabelTable,
    ) -> Result<Self> {
        config.validate()?;

        for (table, classes) in [
            (&static_labels, config.static_classes),
            (&dynamic_labels, config.dynamic_classes),
        ] {
            if let Some(classes) = classes {
                if table.len() < classes {
                    return Err(GestureError::Configuration(format!(
                        "{} label table has {} labels for {} classes",
                        table.mode(),
                        table.len(),
                        classes
                    )));
                }
            }
        }

        log::info!(
            "gesture pipeline ready: history={} thresholds={}/{} labels={}/{}",
            config.history_length,
            config.static_threshold,
            config.dynamic_threshold,
            static_labels.len(),
            dynamic_labels.len()
        );

        Ok(Self {
            static_gate: ClassificationGate::new(
                GestureMode::Static,
                config.static_threshold,
                config.static_classes,
            ),
            dynamic_gate: ClassificationGate::new(
                GestureMode::Dynamic,
                config.dynamic_threshold,
                config.dynamic_classes,
            ),
            static_votes: VoteSmoother::new(config.history_length),
            dynamic_votes: VoteSmoother::new(config.history_length),
            point_history: RingBuffer::new(config.history_length),
            static_model,
            dynamic_model,
            static_labels,
            dynamic_labels,
            stats: PipelineStats::default(),
            config,
        })
    }

    /// Frame boundary: process a frame, log and drop it on error
    ///
    /// Returns the output surface text for frames that produced one.
    pub async fn on_frame(&mut self, hand: Option<&[Point2<f32>]>) -> Option<String> {
        match self.process_frame(hand).await {
            Ok(report) => report.map(|r| r.to_string()),
            Err(e) => {
                self.count_dropped(&e);
                None
            }
        }
    }

    /// Count a frame whose input could not be turned into landmarks
    pub fn reject_input(&mut self, err: &GestureError) {
        self.stats.frames_seen += 1;
        self.count_dropped(err);
    }

    fn count_dropped(&mut self, err: &GestureError) {
        self.stats.frames_dropped += 1;
        log::warn!("dropping frame {}: {}", self.stats.frames_seen, err);
    }

    /// Run one frame through both paths
    ///
    /// `Ok(None)` means no hand was detected and nothing changed. The
    /// fingertip is tracked and the dynamic path runs even when the static
    /// path fails; the static error is returned afterwards. A dynamic-path
    /// error is reported in the frame report instead.
    pub async fn process_frame(
        &mut self,
        hand: Option<&[Point2<f32>]>,
    ) -> Result<Option<FrameReport>> {
        self.stats.frames_seen += 1;

        let landmarks = match hand {
            Some(landmarks) => landmarks,
            None => {
                self.stats.frames_without_hand += 1;
                return Ok(None);
            }
        };
        self.validate(landmarks)?;

        let pose = self.classify_pose(landmarks).await;

        // Dynamic: sliding window of fingertip positions
        self.point_history.push(landmarks[self.config.tracked_landmark]);
        let dynamic = if self.point_history.is_full() {
            self.stats.dynamic_runs += 1;
            match self.classify_trajectory().await {
                Ok(verdict) => DynamicStatus::Classified(verdict),
                Err(e) => {
                    self.stats.dynamic_failed += 1;
                    log::warn!("dynamic path failed: {}", e);
                    DynamicStatus::Failed(e)
                }
            }
        } else {
            DynamicStatus::Pending {
                buffered: self.point_history.len(),
            }
        };

        let dynamic_label = match self.dynamic_label() {
            Ok(label) => label.map(str::to_string),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };

        let (static_verdict, static_label) = pose?;
        Ok(Some(FrameReport {
            static_verdict,
            static_label,
            dynamic,
            dynamic_label,
        }))
    }

    fn validate(&self, landmarks: &[Point2<f32>]) -> Result<()> {
        if landmarks.len() != self.config.landmark_count {
            return Err(GestureError::MalformedLandmarks {
                expected: format!("{} landmarks", self.config.landmark_count),
                actual: format!("{} landmarks", landmarks.len()),
            });
        }
        match landmarks
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            Some(i) => Err(GestureError::MalformedLandmarks {
                expected: "finite coordinates".to_string(),
                actual: format!("({}, {}) at landmark {}", landmarks[i].x, landmarks[i].y, i),
            }),
            None => Ok(()),
        }
    }

    /// Static: hand pose relative to the wrist
    async fn classify_pose(&mut self, landmarks: &[Point2<f32>]) -> Result<(Verdict, String)> {
        let features = normalize(landmarks)?;
        let verdict = self.static_gate.classify(&features, &self.static_model).await?;
        match verdict {
            Verdict::Accepted(class) => {
                self.static_votes.record(class);
                self.stats.static_accepted += 1;
            }
            Verdict::Rejected => self.stats.static_rejected += 1,
        }
        let label = match self.static_votes.resolve() {
            Some(class) => self.static_labels.label(class)?.to_string(),
            None => UNKNOWN_LABEL.to_string(),
        };
        Ok((verdict, label))
    }

    async fn classify_trajectory(&mut self) -> Result<Verdict> {
        let features = normalize(&self.point_history.contents())?;
        let verdict = self.dynamic_gate.classify(&features, &self.dynamic_model).await?;
        if let Verdict::Accepted(class) = verdict {
            self.dynamic_votes.record(class);
            self.stats.dynamic_accepted += 1;
        }
        Ok(verdict)
    }

    /// Current smoothed static label, `None` before the first accepted vote
    pub fn static_label(&self) -> Result<Option<&str>> {
        self.static_votes
            .resolve()
            .map(|class| self.static_labels.label(class))
            .transpose()
    }

    /// Current smoothed dynamic label, `None` before the first accepted vote
    pub fn dynamic_label(&self) -> Result<Option<&str>> {
        self.dynamic_votes
            .resolve()
            .map(|class| self.dynamic_labels.label(class))
            .transpose()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Buffered fingertip positions, oldest first
    pub fn point_history(&self) -> Vec<Point2<f32>> {
        self.point_history.contents()
    }
}
