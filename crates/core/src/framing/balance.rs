//! Margin balance against the reference: side-to-side shift, vertical
//! position with high-angle awareness, and the four-direction summary.

use serde::{Deserialize, Serialize};

use crate::feedback::units::{steps_for_percent, tilt_angle_for_percent};
use crate::geometry::margins::Margins;

use super::band_score;

/// Center misalignment beyond this fraction is flagged.
const CENTER_ALIGNED_TOLERANCE: f64 = 0.1;

/// Shift magnitude that warrants a concrete movement instruction.
const ADJUSTMENT_TRIGGER: f64 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Perfect,
    Good,
    NeedsMinorAdjustment,
    NeedsAdjustment,
}

impl BalanceStatus {
    /// Status and score for a shift/position deviation magnitude.
    fn grade(magnitude: f64) -> (Self, f64) {
        if magnitude < 0.05 {
            (Self::Perfect, 95.0)
        } else if magnitude < 0.10 {
            (Self::Good, 85.0)
        } else if magnitude < 0.15 {
            (Self::NeedsMinorAdjustment, 70.0)
        } else {
            (Self::NeedsAdjustment, (85.0 - magnitude * 100.0).max(50.0))
        }
    }

    pub fn needs_adjustment(&self) -> bool {
        matches!(self, Self::NeedsAdjustment)
    }
}

// ── horizontal ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizontalAdjustment {
    pub direction: HorizontalDirection,
    pub percent: f64,
    pub camera_action: String,
    pub subject_action: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBalance {
    pub status: BalanceStatus,
    pub score: f64,
    pub current_balance: f64,
    pub reference_balance: f64,
    pub center_shift: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub adjustment: Option<HorizontalAdjustment>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub out_of_frame_warning: Option<String>,
}

/// Compares left/right balance. A positive center shift means the
/// current frame leans further left than the reference, so the camera
/// should move right.
pub fn analyze_horizontal(current: &Margins, reference: &Margins) -> HorizontalBalance {
    let current_balance = current.horizontal_balance();
    let reference_balance = reference.horizontal_balance();
    let center_shift = current_balance - reference_balance;

    let (status, score) = BalanceStatus::grade(center_shift.abs());

    let adjustment = if center_shift.abs() > ADJUSTMENT_TRIGGER {
        let percent = center_shift.abs() * 100.0;
        let steps = steps_for_percent(percent);
        Some(if center_shift > 0.0 {
            HorizontalAdjustment {
                direction: HorizontalDirection::Right,
                percent,
                camera_action: format!("move the camera right about {percent:.0}% of the frame"),
                subject_action: format!("or have the subject move {steps} to the left"),
            }
        } else {
            HorizontalAdjustment {
                direction: HorizontalDirection::Left,
                percent,
                camera_action: format!("move the camera left about {percent:.0}% of the frame"),
                subject_action: format!("or have the subject move {steps} to the right"),
            }
        })
    } else {
        None
    };

    let oof = &current.out_of_frame;
    let out_of_frame_warning = match (oof.left, oof.right) {
        (true, true) => Some("the subject spills past both side edges (too close)".to_string()),
        (true, false) => Some("the subject extends past the left edge".to_string()),
        (false, true) => Some("the subject extends past the right edge".to_string()),
        (false, false) => None,
    };

    HorizontalBalance {
        status,
        score,
        current_balance,
        reference_balance,
        center_shift,
        adjustment,
        out_of_frame_warning,
    }
}

// ── vertical ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalMove {
    /// The frame was shot looking down; correcting needs both a lower
    /// camera and a leveled tilt, not just a tilt change.
    LowerCamera,
    TiltDown,
    TiltUp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalAdjustment {
    pub kind: VerticalMove,
    pub angle: u32,
    pub camera_action: String,
    pub subject_action: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerticalBalance {
    pub status: BalanceStatus,
    pub score: f64,
    pub current_position: f64,
    pub reference_position: f64,
    pub position_diff: f64,
    pub current_high_angle: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub adjustment: Option<VerticalAdjustment>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub out_of_frame_warning: Option<String>,
}

/// Compares the subject's vertical placement (0 = top of frame,
/// 1 = bottom). The correction depends on whether the offset came from
/// camera tilt or camera height, so high-angle frames get a different
/// instruction than level ones.
pub fn analyze_vertical(current: &Margins, reference: &Margins) -> VerticalBalance {
    let current_position = current.vertical_position();
    let reference_position = reference.vertical_position();
    let position_diff = current_position - reference_position;
    let current_high_angle = current.is_high_angle();

    let (status, score) = BalanceStatus::grade(position_diff.abs());

    let adjustment = if position_diff.abs() > ADJUSTMENT_TRIGGER {
        let angle = tilt_angle_for_percent(position_diff.abs() * 100.0);
        Some(if position_diff > 0.0 {
            if current_high_angle {
                VerticalAdjustment {
                    kind: VerticalMove::LowerCamera,
                    angle,
                    camera_action: format!(
                        "lower the camera and level the tilt (about {angle}\u{b0} flatter)"
                    ),
                    subject_action: "the subject will settle lower in the frame".to_string(),
                }
            } else {
                VerticalAdjustment {
                    kind: VerticalMove::TiltDown,
                    angle,
                    camera_action: format!("tilt the camera down about {angle}\u{b0}"),
                    subject_action: "or have the subject sit or lower their stance".to_string(),
                }
            }
        } else {
            VerticalAdjustment {
                kind: VerticalMove::TiltUp,
                angle,
                camera_action: format!("tilt the camera up about {angle}\u{b0}"),
                subject_action: "or have the subject stand or raise their stance".to_string(),
            }
        })
    } else {
        None
    };

    let oof = &current.out_of_frame;
    let out_of_frame_warning = match (oof.top, oof.bottom) {
        (true, true) => Some("the subject spills past the top and bottom edges (too close)".to_string()),
        (true, false) => Some("the subject's head is cut off by the top edge".to_string()),
        (false, true) => Some("the subject's feet are cut off by the bottom edge".to_string()),
        (false, false) => None,
    };

    VerticalBalance {
        status,
        score,
        current_position,
        reference_position,
        position_diff,
        current_high_angle,
        adjustment,
        out_of_frame_warning,
    }
}

// ── four-direction summary ──────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerDirection {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenterAlignment {
    pub current: f64,
    pub reference: f64,
    pub difference: f64,
    pub aligned: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginComparison {
    pub differences: PerDirection,
    pub scores: PerDirection,
    pub overall_score: f64,
    pub center_alignment: CenterAlignment,
}

/// Per-direction margin deviations, their band scores averaged into one
/// balance score, and a derived horizontal-center alignment check.
pub fn compare_margins(current: &Margins, reference: &Margins) -> MarginComparison {
    let differences = PerDirection {
        top: (current.top - reference.top).abs(),
        bottom: (current.bottom - reference.bottom).abs(),
        left: (current.left - reference.left).abs(),
        right: (current.right - reference.right).abs(),
    };
    let scores = PerDirection {
        top: band_score(differences.top),
        bottom: band_score(differences.bottom),
        left: band_score(differences.left),
        right: band_score(differences.right),
    };
    let overall_score = (scores.top + scores.bottom + scores.left + scores.right) / 4.0;

    let current_center = current.horizontal_balance() / 2.0 + 0.5;
    let reference_center = reference.horizontal_balance() / 2.0 + 0.5;
    let difference = (current_center - reference_center).abs();

    MarginComparison {
        differences,
        scores,
        overall_score,
        center_alignment: CenterAlignment {
            current: current_center,
            reference: reference_center,
            difference,
            aligned: difference <= CENTER_ALIGNED_TOLERANCE,
        },
    }
}
