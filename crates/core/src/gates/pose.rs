//! Gate 4: fine pose details. Informational only; never blocks.

use serde::{Deserialize, Serialize};

use crate::shared::keypoints::{Keypoint, KeypointSet};

/// Hand keypoints (of 21) that make a gesture clearly detected.
const HAND_DETECTED_COUNT: usize = 15;

/// Below this, the hand is effectively absent from the frame.
const HAND_MISSING_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseCategory {
    Posture,
    HandGesture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteImportance {
    /// Worth trying once the fundamentals match.
    Optional,
    /// A detection limitation on the reference side, not a user error.
    Caveat,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseNote {
    pub category: PoseCategory,
    pub importance: NoteImportance,
    pub suggestion: String,
}

/// How level the shoulder line is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiltGrade {
    Level,
    Acceptable,
    Minor,
    Pronounced,
}

impl TiltGrade {
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation < 5.0 {
            Self::Level
        } else if deviation < 10.0 {
            Self::Acceptable
        } else if deviation < 20.0 {
            Self::Minor
        } else {
            Self::Pronounced
        }
    }
}

/// Deviation of the shoulder line from horizontal, in degrees.
///
/// `atan2` spans ±180°, so a level line can read near ±180 depending on
/// which shoulder is passed first; deviation is folded back so swapping
/// the shoulders never changes the magnitude.
pub fn shoulder_tilt_deviation(left: &Keypoint, right: &Keypoint) -> f64 {
    let angle = (right.y() - left.y()).atan2(right.x() - left.x()).to_degrees();
    if angle.abs() > 90.0 {
        (angle.abs() - 180.0).abs()
    } else {
        angle.abs()
    }
}

/// Collects informational pose notes: shoulder level and hand-gesture
/// presence relative to the reference.
pub fn check_pose(current: &KeypointSet, reference: &KeypointSet) -> Vec<PoseNote> {
    let mut notes = Vec::new();

    if let (Some(left), Some(right)) = (
        &current.body.left_shoulder,
        &current.body.right_shoulder,
    ) {
        let deviation = shoulder_tilt_deviation(left, right);
        match TiltGrade::from_deviation(deviation) {
            TiltGrade::Level | TiltGrade::Acceptable => {}
            TiltGrade::Minor => notes.push(PoseNote {
                category: PoseCategory::Posture,
                importance: NoteImportance::Optional,
                suggestion: format!(
                    "shoulders are tilted about {deviation:.0}\u{b0}; consider leveling them"
                ),
            }),
            TiltGrade::Pronounced => notes.push(PoseNote {
                category: PoseCategory::Posture,
                importance: NoteImportance::Optional,
                suggestion: format!(
                    "shoulders are tilted about {deviation:.0}\u{b0}; level them to match the reference"
                ),
            }),
        }
    }

    notes.extend(hand_notes(current, reference));
    notes
}

fn hand_notes(current: &KeypointSet, reference: &KeypointSet) -> Vec<PoseNote> {
    let mut notes = Vec::new();

    if reference.hand_count() == 0 {
        // Nothing to compare against; flag it only when the current
        // frame clearly shows a hand, so the mismatch isn't read as a
        // user error.
        if current.hand_count() > HAND_DETECTED_COUNT {
            notes.push(PoseNote {
                category: PoseCategory::HandGesture,
                importance: NoteImportance::Caveat,
                suggestion: "reference hand gesture undetected (possibly occluded); skipping \
                             gesture comparison"
                    .to_string(),
            });
        }
        return notes;
    }

    let sides = [
        ("right", reference.right_hand.len(), current.right_hand.len()),
        ("left", reference.left_hand.len(), current.left_hand.len()),
    ];
    for (side, ref_count, curr_count) in sides {
        if ref_count > HAND_DETECTED_COUNT && curr_count < HAND_MISSING_COUNT {
            notes.push(PoseNote {
                category: PoseCategory::HandGesture,
                importance: NoteImportance::Optional,
                suggestion: format!(
                    "the reference shows a {side}-hand gesture; raise your {side} hand so it is \
                     visible"
                ),
            });
        }
    }
    notes
}
