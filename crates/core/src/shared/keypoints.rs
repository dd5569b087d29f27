//! Typed keypoint set produced by an external pose provider.
//!
//! A joint is present when its field is `Some`; providers drop entries
//! below `DETECTION_CONFIDENCE_THRESHOLD` before building the set, so
//! absence is the only "not detected" representation (never a
//! zero-valued entry).

use serde::{Deserialize, Serialize};

/// One detected point: pixel position plus provider confidence in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub position: (f64, f64),
    pub confidence: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            position: (x, y),
            confidence,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.0
    }

    pub fn y(&self) -> f64 {
        self.position.1
    }
}

/// Named body joints, one optional slot per joint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyKeypoints {
    pub nose: Option<Keypoint>,
    pub left_shoulder: Option<Keypoint>,
    pub right_shoulder: Option<Keypoint>,
    pub left_elbow: Option<Keypoint>,
    pub right_elbow: Option<Keypoint>,
    pub left_wrist: Option<Keypoint>,
    pub right_wrist: Option<Keypoint>,
    pub left_hip: Option<Keypoint>,
    pub right_hip: Option<Keypoint>,
    pub left_knee: Option<Keypoint>,
    pub right_knee: Option<Keypoint>,
    pub left_ankle: Option<Keypoint>,
    pub right_ankle: Option<Keypoint>,
}

impl BodyKeypoints {
    /// Iterates over the joints that are present.
    pub fn present(&self) -> impl Iterator<Item = &Keypoint> {
        [
            &self.nose,
            &self.left_shoulder,
            &self.right_shoulder,
            &self.left_elbow,
            &self.right_elbow,
            &self.left_wrist,
            &self.right_wrist,
            &self.left_hip,
            &self.right_hip,
            &self.left_knee,
            &self.right_knee,
            &self.left_ankle,
            &self.right_ankle,
        ]
        .into_iter()
        .filter_map(|joint| joint.as_ref())
    }

    pub fn count(&self) -> usize {
        self.present().count()
    }

    pub fn has_both_shoulders(&self) -> bool {
        self.left_shoulder.is_some() && self.right_shoulder.is_some()
    }

    pub fn has_one_shoulder(&self) -> bool {
        self.left_shoulder.is_some() != self.right_shoulder.is_some()
    }

    pub fn has_shoulder(&self) -> bool {
        self.left_shoulder.is_some() || self.right_shoulder.is_some()
    }

    pub fn has_elbow(&self) -> bool {
        self.left_elbow.is_some() || self.right_elbow.is_some()
    }

    pub fn has_both_hips(&self) -> bool {
        self.left_hip.is_some() && self.right_hip.is_some()
    }

    pub fn has_hip(&self) -> bool {
        self.left_hip.is_some() || self.right_hip.is_some()
    }

    pub fn has_knee(&self) -> bool {
        self.left_knee.is_some() || self.right_knee.is_some()
    }

    pub fn has_ankle(&self) -> bool {
        self.left_ankle.is_some() || self.right_ankle.is_some()
    }

    /// Lowest (largest y) of the present ankles, if any.
    pub fn lowest_ankle_y(&self) -> Option<f64> {
        match (&self.left_ankle, &self.right_ankle) {
            (Some(l), Some(r)) => Some(l.y().max(r.y())),
            (Some(l), None) => Some(l.y()),
            (None, Some(r)) => Some(r.y()),
            (None, None) => None,
        }
    }
}

/// Everything the pose provider extracted from one image.
///
/// Face, hand, and foot landmarks are stored positionally: no operation
/// in this crate consumes an individual landmark by name, only counts
/// and positions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypointSet {
    pub num_persons: u32,
    pub body: BodyKeypoints,
    pub face_landmarks: Vec<Keypoint>,
    pub left_hand: Vec<Keypoint>,
    pub right_hand: Vec<Keypoint>,
    pub foot_keypoints: Vec<Keypoint>,
}

impl KeypointSet {
    pub fn has_person(&self) -> bool {
        self.num_persons > 0
    }

    /// Total keypoints across all groups.
    pub fn total_count(&self) -> usize {
        self.body.count()
            + self.face_landmarks.len()
            + self.left_hand.len()
            + self.right_hand.len()
            + self.foot_keypoints.len()
    }

    pub fn hand_count(&self) -> usize {
        self.left_hand.len() + self.right_hand.len()
    }

    /// Topmost (smallest y) detected point of the head region: nose
    /// when present, otherwise the highest face landmark.
    pub fn head_top_y(&self) -> Option<f64> {
        if let Some(nose) = &self.body.nose {
            return Some(nose.y());
        }
        self.face_landmarks
            .iter()
            .map(Keypoint::y)
            .min_by(f64::total_cmp)
    }
}
