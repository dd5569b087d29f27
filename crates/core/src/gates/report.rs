//! Typed results of a gate run.

use serde::{Deserialize, Serialize};

use crate::framing::analyzer::FramingAnalysis;

use super::aspect_ratio::AspectRatioFeedback;
use super::composition::CompositionFeedback;
use super::compression::CompressionFeedback;
use super::pose::PoseNote;

/// The gates in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateName {
    AspectRatio,
    Framing,
    Composition,
    Compression,
    Pose,
}

impl GateName {
    pub const ORDER: [GateName; 5] = [
        GateName::AspectRatio,
        GateName::Framing,
        GateName::Composition,
        GateName::Compression,
        GateName::Pose,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AspectRatio => "aspect ratio",
            Self::Framing => "framing",
            Self::Composition => "composition",
            Self::Compression => "compression",
            Self::Pose => "pose",
        }
    }
}

/// Final status of a comparison. One closed set so the formatter can
/// match exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    AspectRatioMismatch,
    FramingMismatch,
    CompositionAdjust,
    CompressionAdjust,
    FineTuning,
    AllPassed,
}

impl GateStatus {
    /// Stable machine-readable name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AspectRatioMismatch => "ASPECT_RATIO_MISMATCH",
            Self::FramingMismatch => "FRAMING_MISMATCH",
            Self::CompositionAdjust => "COMPOSITION_ADJUST",
            Self::CompressionAdjust => "COMPRESSION_ADJUST",
            Self::FineTuning => "FINE_TUNING",
            Self::AllPassed => "ALL_PASSED",
        }
    }

    /// The gate that produced this status, if it marks a failure.
    pub fn failing_gate(&self) -> Option<GateName> {
        match self {
            Self::AspectRatioMismatch => Some(GateName::AspectRatio),
            Self::FramingMismatch => Some(GateName::Framing),
            Self::CompositionAdjust => Some(GateName::Composition),
            Self::CompressionAdjust => Some(GateName::Compression),
            Self::FineTuning | Self::AllPassed => None,
        }
    }

    /// One-line user guidance for the state the comparison stopped in.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::AspectRatioMismatch => "match the frame aspect ratio first",
            Self::FramingMismatch => "adjust what fits in the frame",
            Self::CompositionAdjust => "adjust the subject's position in the frame",
            Self::CompressionAdjust => "adjust the background compression",
            Self::FineTuning => "fundamentals look good; fine-tune the pose",
            Self::AllPassed => "matches the reference",
        }
    }
}

/// Score, pass flag, and typed feedback for one scored gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredGate<F> {
    pub score: f64,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default = "Option::default")]
    pub feedback: Option<F>,
}

impl<F> ScoredGate<F> {
    pub fn new(score: f64, threshold: f64, feedback: Option<F>) -> Self {
        Self {
            score,
            passed: score >= threshold,
            feedback,
        }
    }
}

/// Per-gate results for one comparison. In production mode only the
/// gates reached before the first failure are present; full analysis
/// fills every field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<ScoredGate<AspectRatioFeedback>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing: Option<ScoredGate<FramingAnalysis>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<ScoredGate<CompositionFeedback>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<ScoredGate<CompressionFeedback>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Vec<PoseNote>>,
}

impl GateReport {
    /// (name, score, passed) for each evaluated scored gate, in order.
    pub fn scored(&self) -> Vec<(GateName, f64, bool)> {
        let mut entries = Vec::new();
        if let Some(g) = &self.aspect_ratio {
            entries.push((GateName::AspectRatio, g.score, g.passed));
        }
        if let Some(g) = &self.framing {
            entries.push((GateName::Framing, g.score, g.passed));
        }
        if let Some(g) = &self.composition {
            entries.push((GateName::Composition, g.score, g.passed));
        }
        if let Some(g) = &self.compression {
            entries.push((GateName::Compression, g.score, g.passed));
        }
        entries
    }

    /// Mean of the evaluated scored gates; 0 when none ran.
    pub fn scored_mean(&self) -> f64 {
        let scored = self.scored();
        if scored.is_empty() {
            return 0.0;
        }
        scored.iter().map(|(_, score, _)| score).sum::<f64>() / scored.len() as f64
    }

    /// First failing gate in evaluation order.
    pub fn first_failing(&self) -> Option<GateName> {
        self.scored()
            .into_iter()
            .find(|(_, _, passed)| !passed)
            .map(|(name, _, _)| name)
    }

    pub fn failed_gates(&self) -> Vec<GateName> {
        self.scored()
            .into_iter()
            .filter(|(_, _, passed)| !passed)
            .map(|(name, _, _)| name)
            .collect()
    }

    pub fn passed_gates(&self) -> Vec<GateName> {
        self.scored()
            .into_iter()
            .filter(|(_, _, passed)| *passed)
            .map(|(name, _, _)| name)
            .collect()
    }

    pub fn has_pose_notes(&self) -> bool {
        self.pose.as_ref().is_some_and(|notes| !notes.is_empty())
    }
}
