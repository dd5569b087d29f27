//! Shot-type classification and comparison.
//!
//! The classifier checks from the widest framing downward so the
//! widest visible joint always wins. Orientation matters: a back or
//! side view is classified from body joints alone.

use serde::{Deserialize, Serialize};

use crate::shared::frame::FrameShape;
use crate::shared::keypoints::KeypointSet;

use super::orientation::{Orientation, OrientationDetection};

/// Foot keypoints needed before the feet count as reliably in frame.
const FULL_SHOT_MIN_FOOT_POINTS: usize = 3;

/// Ankle-to-head span (fraction of frame height) that implies a full
/// body even when individual foot points were not confident.
const FULL_SHOT_MIN_SPAN: f64 = 0.5;

/// Face landmark counts distinguishing closeup variants.
const BUST_MIN_FACE_LANDMARKS: usize = 50;
const EXTREME_CLOSEUP_MIN_FACE_LANDMARKS: usize = 60;

/// Discrete framing category, ordered tightest to widest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    ExtremeCloseup,
    Closeup,
    BustShot,
    MediumShot,
    KneeShot,
    FullShot,
    Unknown,
}

impl ShotType {
    /// Position in the tight-to-wide ordering; `None` for `Unknown`.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Self::ExtremeCloseup => Some(0),
            Self::Closeup => Some(1),
            Self::BustShot => Some(2),
            Self::MediumShot => Some(3),
            Self::KneeShot => Some(4),
            Self::FullShot => Some(5),
            Self::Unknown => None,
        }
    }

    /// Bust and medium are a matter of degree; every other type is its
    /// own category. The knee/full gap in particular is perceptually
    /// large (whether the feet are visible).
    pub fn same_category(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (Self::BustShot, Self::MediumShot) | (Self::MediumShot, Self::BustShot)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtremeCloseup => "extreme closeup",
            Self::Closeup => "closeup",
            Self::BustShot => "bust shot",
            Self::MediumShot => "medium shot",
            Self::KneeShot => "knee shot",
            Self::FullShot => "full shot",
            Self::Unknown => "unknown",
        }
    }
}

/// A classified shot with the orientation it was classified under.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotDetection {
    pub shot_type: ShotType,
    pub orientation: Orientation,
    pub confidence: f64,
}

impl ShotDetection {
    /// Display label, tagged with the orientation when the subject is
    /// facing away (the classification was made under relaxed rules).
    pub fn label(&self) -> String {
        if self.orientation.is_facing_away() {
            format!("{} ({})", self.shot_type.label(), self.orientation.label())
        } else {
            self.shot_type.label().to_string()
        }
    }
}

/// Determines the shot type from which joints are visible.
pub fn classify_shot(
    keypoints: &KeypointSet,
    shape: FrameShape,
    orientation: &OrientationDetection,
) -> ShotDetection {
    if !keypoints.has_person() {
        return ShotDetection {
            shot_type: ShotType::Unknown,
            orientation: Orientation::NoPerson,
            confidence: 0.0,
        };
    }

    if orientation.direction.is_facing_away() {
        return classify_partial_view(keypoints, orientation.direction);
    }

    let body = &keypoints.body;
    let face_count = keypoints.face_landmarks.len();

    let (shot_type, confidence) = if keypoints.foot_keypoints.len() >= FULL_SHOT_MIN_FOOT_POINTS {
        (ShotType::FullShot, 0.9)
    } else if ankle_head_span_ratio(keypoints, shape).is_some_and(|r| r > FULL_SHOT_MIN_SPAN) {
        (ShotType::FullShot, 0.85)
    } else if body.has_knee() {
        (ShotType::KneeShot, 0.85)
    } else if body.has_both_hips() {
        (ShotType::MediumShot, 0.8)
    } else if body.has_elbow() {
        (ShotType::BustShot, 0.75)
    } else if body.has_both_shoulders() {
        if face_count > BUST_MIN_FACE_LANDMARKS {
            (ShotType::BustShot, 0.75)
        } else {
            (ShotType::Closeup, 0.7)
        }
    } else if face_count > EXTREME_CLOSEUP_MIN_FACE_LANDMARKS {
        (ShotType::ExtremeCloseup, 0.8)
    } else {
        (ShotType::Unknown, 0.3)
    };

    ShotDetection {
        shot_type,
        orientation: orientation.direction,
        confidence,
    }
}

/// Relaxed classification for back and side views: face landmarks are
/// unusable, so only body-joint presence counts.
fn classify_partial_view(keypoints: &KeypointSet, orientation: Orientation) -> ShotDetection {
    let body = &keypoints.body;

    let (shot_type, confidence) = if body.has_ankle() || !keypoints.foot_keypoints.is_empty() {
        (ShotType::FullShot, 0.7)
    } else if body.has_knee() {
        (ShotType::KneeShot, 0.7)
    } else if body.has_hip() {
        (ShotType::MediumShot, 0.6)
    } else if body.has_shoulder() {
        (ShotType::BustShot, 0.5)
    } else {
        (ShotType::Unknown, 0.3)
    };

    ShotDetection {
        shot_type,
        orientation,
        confidence,
    }
}

fn ankle_head_span_ratio(keypoints: &KeypointSet, shape: FrameShape) -> Option<f64> {
    let ankle_y = keypoints.body.lowest_ankle_y()?;
    let head_y = keypoints.head_top_y()?;
    Some((ankle_y - head_y) / shape.height_f())
}

/// How two classified shots compare for scoring and advice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotComparison {
    pub current: ShotDetection,
    pub reference: ShotDetection,
    pub same_category: bool,
    pub score: f64,
    pub needs_adjustment: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub adjustment: Option<String>,
}

/// Scores how closely the current shot type matches the reference.
pub fn compare_shot_types(current: ShotDetection, reference: ShotDetection) -> ShotComparison {
    let curr = current.shot_type;
    let reference_type = reference.shot_type;

    let score = if curr == reference_type {
        95.0
    } else if curr.same_category(&reference_type) {
        75.0
    } else {
        match (curr.ordinal(), reference_type.ordinal()) {
            (Some(a), Some(b)) => {
                if is_knee_full_pair(curr, reference_type) {
                    55.0
                } else {
                    let distance = a.abs_diff(b) as f64;
                    (75.0 - distance * 10.0).max(50.0)
                }
            }
            // Unknown on either side: moderate penalty, not catastrophic
            _ => 60.0,
        }
    };

    let adjustment = if curr == reference_type {
        None
    } else {
        Some(shot_gap_adjustment(curr, reference_type))
    };

    ShotComparison {
        current,
        reference,
        same_category: curr.same_category(&reference_type),
        score,
        needs_adjustment: score < 80.0,
        adjustment,
    }
}

fn is_knee_full_pair(a: ShotType, b: ShotType) -> bool {
    matches!(
        (a, b),
        (ShotType::KneeShot, ShotType::FullShot) | (ShotType::FullShot, ShotType::KneeShot)
    )
}

/// Concrete instruction for moving between two shot types.
fn shot_gap_adjustment(current: ShotType, target: ShotType) -> String {
    match (current, target) {
        (ShotType::KneeShot, ShotType::FullShot) => {
            return "step back or zoom out until the feet are in frame".to_string();
        }
        (ShotType::FullShot, ShotType::KneeShot) => {
            return "move in or zoom until the frame cuts at the knees".to_string();
        }
        _ => {}
    }

    match (current.ordinal(), target.ordinal()) {
        (Some(curr_idx), Some(target_idx)) if curr_idx < target_idx => {
            let gap = target_idx - curr_idx;
            if gap == 1 {
                "step back a little or zoom out one step".to_string()
            } else {
                format!("step back or zoom out about {gap} steps")
            }
        }
        (Some(curr_idx), Some(target_idx)) if curr_idx > target_idx => {
            let gap = curr_idx - target_idx;
            if gap == 1 {
                "move a little closer or zoom in one step".to_string()
            } else {
                format!("move closer or zoom in about {gap} steps")
            }
        }
        _ => "adjust how much of the subject is in frame".to_string(),
    }
}
