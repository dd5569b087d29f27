//! How much of the frame the subject occupies, current vs reference.

use serde::{Deserialize, Serialize};

use super::band_score;

/// Dead zone around the reference ratio before a direction is called.
const DIRECTION_DEAD_ZONE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeDirection {
    Smaller,
    Larger,
    Similar,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectRatioAnalysis {
    pub current_ratio: f64,
    pub reference_ratio: f64,
    pub difference: f64,
    pub direction: SizeDirection,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<String>,
}

impl SubjectRatioAnalysis {
    pub fn needs_adjustment(&self) -> bool {
        self.action.is_some()
    }
}

/// Compares subject-area ratios and phrases the correction as a
/// forward/backward move.
pub fn compare_subject_ratio(current: f64, reference: f64) -> SubjectRatioAnalysis {
    let difference = (current - reference).abs();
    let score = band_score(difference);
    let percent = difference * 100.0;

    let (direction, action) = if current < reference - DIRECTION_DEAD_ZONE {
        (
            SizeDirection::Smaller,
            Some(format!(
                "move closer or zoom in so the subject fills about {percent:.0}% more of the frame"
            )),
        )
    } else if current > reference + DIRECTION_DEAD_ZONE {
        (
            SizeDirection::Larger,
            Some(format!(
                "step back or zoom out; the subject takes up about {percent:.0}% too much of the frame"
            )),
        )
    } else {
        (SizeDirection::Similar, None)
    };

    SubjectRatioAnalysis {
        current_ratio: current,
        reference_ratio: reference,
        difference,
        direction,
        score,
        action,
    }
}
