//! Gate 2: subject placement on the rule-of-thirds grid.

use serde::{Deserialize, Serialize};

use crate::feedback::units::{steps_for_percent, tilt_angle_for_percent};
use crate::geometry::grid::{face_center, grid_position};
use crate::shared::frame::FrameAnalysis;

/// Score when both faces land in the same grid cell.
const SAME_CELL_SCORE: f64 = 90.0;

/// Neutral score when a face center cannot be estimated on either side.
const NO_CENTER_SCORE: f64 = 75.0;

/// Normalized offset below which no movement instruction is emitted.
const MOVEMENT_DEAD_ZONE: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositionFeedback {
    pub current_grid: (u8, u8),
    pub target_grid: (u8, u8),
    /// 3x3 map with `o` marking the current cell and `*` the target.
    pub grid_visual: String,
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositionCheck {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<CompositionFeedback>,
}

/// Compares face positions between the two frames.
pub fn check_composition(current: &FrameAnalysis, reference: &FrameAnalysis) -> CompositionCheck {
    let (curr_center, ref_center) = match (
        face_center(&current.keypoints, current.shape),
        face_center(&reference.keypoints, reference.shape),
    ) {
        (Some(c), Some(r)) => (c, r),
        _ => {
            return CompositionCheck {
                score: NO_CENTER_SCORE,
                feedback: None,
            }
        }
    };

    let current_grid = grid_position(curr_center);
    let target_grid = grid_position(ref_center);

    if current_grid == target_grid {
        return CompositionCheck {
            score: SAME_CELL_SCORE,
            feedback: None,
        };
    }

    let distance =
        ((curr_center.0 - ref_center.0).powi(2) + (curr_center.1 - ref_center.1).powi(2)).sqrt();
    let score = (80.0 - distance * 100.0).max(40.0);

    CompositionCheck {
        score,
        feedback: Some(CompositionFeedback {
            current_grid,
            target_grid,
            grid_visual: render_grid(current_grid, target_grid),
            actions: movement_actions(curr_center, ref_center),
        }),
    }
}

/// ASCII rule-of-thirds map. The target marker wins a shared cell.
fn render_grid(current: (u8, u8), target: (u8, u8)) -> String {
    let mut lines = vec!["+---+---+---+".to_string()];
    for y in 1..=3u8 {
        let mut row = String::from("|");
        for x in 1..=3u8 {
            if (x, y) == target {
                row.push_str(" * |");
            } else if (x, y) == current {
                row.push_str(" o |");
            } else {
                row.push_str("   |");
            }
        }
        lines.push(row);
        lines.push("+---+---+---+".to_string());
    }
    lines.push("o = current, * = target".to_string());
    lines.join("\n")
}

/// Camera moves (and subject alternatives) that close the gap between
/// the two normalized centers.
fn movement_actions(current: (f64, f64), target: (f64, f64)) -> Vec<String> {
    let mut actions = Vec::new();

    let x_diff = target.0 - current.0;
    if x_diff.abs() > MOVEMENT_DEAD_ZONE {
        let percent = x_diff.abs() * 100.0;
        let steps = steps_for_percent(percent);
        if x_diff > 0.0 {
            actions.push(format!("move the camera left about {percent:.0}% of the frame"));
            actions.push(format!("or have the subject move {steps} to the right"));
        } else {
            actions.push(format!("move the camera right about {percent:.0}% of the frame"));
            actions.push(format!("or have the subject move {steps} to the left"));
        }
    }

    let y_diff = target.1 - current.1;
    if y_diff.abs() > MOVEMENT_DEAD_ZONE {
        let angle = tilt_angle_for_percent(y_diff.abs() * 100.0);
        if y_diff > 0.0 {
            actions.push(format!("tilt the camera down about {angle}\u{b0}"));
        } else {
            actions.push(format!("tilt the camera up about {angle}\u{b0}"));
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::FrameShape;
    use crate::shared::keypoints::{BodyKeypoints, Keypoint, KeypointSet};
    use approx::assert_relative_eq;

    fn shape() -> FrameShape {
        FrameShape::new(900, 900).unwrap()
    }

    /// Person whose face center is the nose at (x, y).
    fn face_at(x: f64, y: f64) -> FrameAnalysis {
        let keypoints = KeypointSet {
            num_persons: 1,
            body: BodyKeypoints {
                nose: Some(Keypoint::new(x, y, 0.9)),
                ..BodyKeypoints::default()
            },
            ..KeypointSet::default()
        };
        FrameAnalysis::new(shape(), keypoints)
    }

    fn no_person() -> FrameAnalysis {
        FrameAnalysis::new(shape(), KeypointSet::default())
    }

    // ── scoring ─────────────────────────────────────────────────────

    #[test]
    fn test_same_cell_scores_flat_90() {
        // Both centers in the middle cell, at different sub-cell spots
        let check = check_composition(&face_at(400.0, 400.0), &face_at(500.0, 500.0));
        assert_relative_eq!(check.score, 90.0);
        assert!(check.feedback.is_none());
    }

    #[test]
    fn test_different_cells_score_by_distance() {
        // Centers at (0.17, 0.5) and (0.83, 0.5): distance 0.67
        let check = check_composition(&face_at(150.0, 450.0), &face_at(750.0, 450.0));
        assert_relative_eq!(check.score, 40.0, epsilon = 0.5);
        assert!(check.feedback.is_some());
    }

    #[test]
    fn test_adjacent_cells_score_mildly() {
        // 0.5 → 0.75 horizontally: distance 0.25, score 55
        let check = check_composition(&face_at(450.0, 450.0), &face_at(675.0, 450.0));
        assert_relative_eq!(check.score, 55.0, epsilon = 0.5);
    }

    #[test]
    fn test_missing_center_is_neutral() {
        let check = check_composition(&no_person(), &face_at(450.0, 450.0));
        assert_relative_eq!(check.score, NO_CENTER_SCORE);
        assert!(check.feedback.is_none());
    }

    // ── feedback rendering ──────────────────────────────────────────

    #[test]
    fn test_grid_visual_marks_both_cells() {
        let visual = render_grid((1, 1), (3, 2));
        let lines: Vec<&str> = visual.lines().collect();
        // Row 1 holds `o` in the first cell
        assert_eq!(lines[1], "| o |   |   |");
        // Row 2 holds `*` in the third cell
        assert_eq!(lines[3], "|   |   | * |");
        assert!(visual.ends_with("o = current, * = target"));
    }

    #[test]
    fn test_grid_visual_target_wins_shared_cell() {
        let visual = render_grid((2, 2), (2, 2));
        assert!(visual.contains('*'));
        assert!(!visual.contains('o'));
    }

    #[test]
    fn test_movement_points_camera_toward_target() {
        // Target is left of and below the current center
        let check = check_composition(&face_at(750.0, 150.0), &face_at(150.0, 750.0));
        let fb = check.feedback.unwrap();
        let joined = fb.actions.join(" | ");
        assert!(joined.contains("move the camera right"), "{joined}");
        assert!(joined.contains("tilt the camera down"), "{joined}");
    }

    #[test]
    fn test_small_axis_offset_emits_no_instruction_for_it() {
        // Mostly horizontal offset; vertical within dead zone
        let check = check_composition(&face_at(150.0, 450.0), &face_at(750.0, 460.0));
        let fb = check.feedback.unwrap();
        assert!(!fb.actions.iter().any(|a| a.contains("tilt")));
    }
}
