//! Subject orientation inferred from landmark density.
//!
//! A back-facing subject legitimately has no face landmarks even in a
//! tight shot; downstream classifiers relax their rules based on this
//! signal instead of misreading every back view as "unknown".

use serde::{Deserialize, Serialize};

use crate::shared::keypoints::KeypointSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Front,
    Side,
    Back,
    BackOrSide,
    Unclear,
    NoPerson,
}

impl Orientation {
    /// True when face landmarks cannot be trusted for classification.
    pub fn is_facing_away(&self) -> bool {
        matches!(self, Self::Back | Self::Side | Self::BackOrSide)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Back => "back",
            Self::BackOrSide => "back or side",
            Self::Unclear => "unclear",
            Self::NoPerson => "no person",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationDetection {
    pub direction: Orientation,
    pub confidence: f64,
}

/// Classifies orientation from how densely the face is landmarked
/// relative to which body joints were found.
pub fn detect_orientation(keypoints: &KeypointSet) -> OrientationDetection {
    if !keypoints.has_person() {
        return OrientationDetection {
            direction: Orientation::NoPerson,
            confidence: 0.0,
        };
    }

    let face_count = keypoints.face_landmarks.len();
    let body = &keypoints.body;
    let has_nose = body.nose.is_some();

    let (direction, confidence) = if face_count > 30 && has_nose {
        (Orientation::Front, 0.9)
    } else if face_count > 10 {
        (Orientation::Side, 0.7)
    } else if body.has_both_shoulders() && !has_nose {
        (Orientation::Back, 0.8)
    } else if body.has_one_shoulder() {
        (Orientation::Side, 0.6)
    } else if keypoints.total_count() < 5 {
        (Orientation::BackOrSide, 0.3)
    } else {
        (Orientation::Unclear, 0.4)
    };

    OrientationDetection {
        direction,
        confidence,
    }
}
