//! Ordered gate evaluation over two analyzed frames.
//!
//! Production mode stops at the first failing gate so the user sees
//! only the most fundamental problem; fixing it usually changes the
//! picture enough that later gates need re-checking anyway. Full
//! analysis runs everything and reports the lot.
//!
//! Both modes are pure functions of their inputs: no shared state, safe
//! to call concurrently against the same cached reference analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feedback::action::FeedbackAction;
use crate::feedback::formatter::{collect_actions, friendly_summary};
use crate::framing::analyzer::analyze_framing;
use crate::shared::config::CompareConfig;
use crate::shared::frame::{FrameAnalysis, FrameShapeError};

use super::aspect_ratio::check_aspect_ratio;
use super::composition::check_composition;
use super::compression::check_compression;
use super::pose::check_pose;
use super::report::{GateName, GateReport, GateStatus, ScoredGate};

/// All-passed comparisons get a small nudge, capped here, so a frame
/// that clears every gate reads as a near-perfect match.
const ALL_PASSED_BONUS: f64 = 5.0;
const ALL_PASSED_CAP: f64 = 95.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Stop at the first failing gate.
    Production,
    /// Evaluate every gate and aggregate.
    FullAnalysis,
}

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("invalid {side} frame: {source}")]
    InvalidFrame {
        side: &'static str,
        #[source]
        source: FrameShapeError,
    },
}

/// Complete result of one comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub mode: CompareMode,
    pub status: GateStatus,
    pub overall_score: f64,
    /// The gate to fix first, when any failed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub critical_issue: Option<GateName>,
    pub gates: GateReport,
    pub actions: Vec<FeedbackAction>,
    pub summary: String,
}

impl Comparison {
    /// Gates not evaluated in this run (production mode stops early);
    /// empty after a full analysis.
    pub fn remaining_gates(&self) -> Vec<GateName> {
        let mut remaining = Vec::new();
        if self.gates.aspect_ratio.is_none() {
            remaining.push(GateName::AspectRatio);
        }
        if self.gates.framing.is_none() {
            remaining.push(GateName::Framing);
        }
        if self.gates.composition.is_none() {
            remaining.push(GateName::Composition);
        }
        if self.gates.compression.is_none() {
            remaining.push(GateName::Compression);
        }
        if self.gates.pose.is_none() {
            remaining.push(GateName::Pose);
        }
        remaining
    }
}

/// Compares a current frame against a reference.
///
/// The only hard error is a degenerate frame shape; every degraded
/// input (missing person, sparse keypoints, absent compression signal)
/// comes back as lowered scores and qualifier text instead.
pub fn compare(
    current: &FrameAnalysis,
    reference: &FrameAnalysis,
    mode: CompareMode,
    config: &CompareConfig,
) -> Result<Comparison, CompareError> {
    current
        .shape
        .validate()
        .map_err(|source| CompareError::InvalidFrame {
            side: "current",
            source,
        })?;
    reference
        .shape
        .validate()
        .map_err(|source| CompareError::InvalidFrame {
            side: "reference",
            source,
        })?;

    Ok(match mode {
        CompareMode::Production => production(current, reference, config),
        CompareMode::FullAnalysis => full_analysis(current, reference, config),
    })
}

fn production(
    current: &FrameAnalysis,
    reference: &FrameAnalysis,
    config: &CompareConfig,
) -> Comparison {
    let thresholds = &config.thresholds;
    let mut gates = GateReport::default();

    let aspect = check_aspect_ratio(current.shape, reference.shape);
    log::debug!("aspect ratio gate: {:.1}", aspect.score);
    let gate = ScoredGate::new(aspect.score, thresholds.aspect_ratio, aspect.feedback);
    let passed = gate.passed;
    gates.aspect_ratio = Some(gate);
    if !passed {
        return finish(CompareMode::Production, GateStatus::AspectRatioMismatch, gates);
    }

    let framing = analyze_framing(current, reference, &config.weights);
    log::debug!("framing gate: {:.1}", framing.overall_score);
    let gate = ScoredGate::new(framing.overall_score, thresholds.framing, Some(framing));
    let passed = gate.passed;
    gates.framing = Some(gate);
    if !passed {
        return finish(CompareMode::Production, GateStatus::FramingMismatch, gates);
    }

    let composition = check_composition(current, reference);
    log::debug!("composition gate: {:.1}", composition.score);
    let gate = ScoredGate::new(
        composition.score,
        thresholds.composition,
        composition.feedback,
    );
    let passed = gate.passed;
    gates.composition = Some(gate);
    if !passed {
        return finish(CompareMode::Production, GateStatus::CompositionAdjust, gates);
    }

    let compression = check_compression(current.compression, reference.compression);
    log::debug!("compression gate: {:.1}", compression.score);
    let gate = ScoredGate::new(
        compression.score,
        thresholds.compression,
        compression.feedback,
    );
    let passed = gate.passed;
    gates.compression = Some(gate);
    if !passed {
        return finish(CompareMode::Production, GateStatus::CompressionAdjust, gates);
    }

    gates.pose = Some(check_pose(&current.keypoints, &reference.keypoints));

    let status = if gates.has_pose_notes() {
        GateStatus::FineTuning
    } else {
        GateStatus::AllPassed
    };
    finish(CompareMode::Production, status, gates)
}

fn full_analysis(
    current: &FrameAnalysis,
    reference: &FrameAnalysis,
    config: &CompareConfig,
) -> Comparison {
    let thresholds = &config.thresholds;

    let aspect = check_aspect_ratio(current.shape, reference.shape);
    let framing = analyze_framing(current, reference, &config.weights);
    let composition = check_composition(current, reference);
    let compression = check_compression(current.compression, reference.compression);
    let pose = check_pose(&current.keypoints, &reference.keypoints);

    let gates = GateReport {
        aspect_ratio: Some(ScoredGate::new(
            aspect.score,
            thresholds.aspect_ratio,
            aspect.feedback,
        )),
        framing: Some(ScoredGate::new(
            framing.overall_score,
            thresholds.framing,
            Some(framing),
        )),
        composition: Some(ScoredGate::new(
            composition.score,
            thresholds.composition,
            composition.feedback,
        )),
        compression: Some(ScoredGate::new(
            compression.score,
            thresholds.compression,
            compression.feedback,
        )),
        pose: Some(pose),
    };

    let status = match gates.first_failing() {
        Some(GateName::AspectRatio) => GateStatus::AspectRatioMismatch,
        Some(GateName::Framing) => GateStatus::FramingMismatch,
        Some(GateName::Composition) => GateStatus::CompositionAdjust,
        Some(GateName::Compression) => GateStatus::CompressionAdjust,
        Some(GateName::Pose) | None => {
            if gates.has_pose_notes() {
                GateStatus::FineTuning
            } else {
                GateStatus::AllPassed
            }
        }
    };

    finish(CompareMode::FullAnalysis, status, gates)
}

fn finish(mode: CompareMode, status: GateStatus, gates: GateReport) -> Comparison {
    let critical_issue = status.failing_gate();
    let mean = gates.scored_mean();
    let overall_score = if critical_issue.is_none() {
        (mean + ALL_PASSED_BONUS).min(ALL_PASSED_CAP)
    } else {
        mean
    };

    let actions = collect_actions(&gates);
    let summary = friendly_summary(overall_score, &gates, &actions);
    log::debug!(
        "comparison finished: {status:?}, overall {overall_score:.1}, {} action(s)",
        actions.len()
    );

    Comparison {
        mode,
        status,
        overall_score,
        critical_issue,
        gates,
        actions,
        summary,
    }
}
