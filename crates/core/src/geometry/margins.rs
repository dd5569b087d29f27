//! Four-directional margins between the subject and the frame edges.

use serde::{Deserialize, Serialize};

use crate::shared::constants::MARGIN_CLAMP;
use crate::shared::frame::FrameShape;
use crate::shared::keypoints::KeypointSet;

use super::bbox::bounding_box;

/// Which edges the subject's bounding box crosses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfFrame {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl OutOfFrame {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// Fractional distance from the subject's bounding box to each frame
/// edge. Negative when the subject extends past that edge; values are
/// clamped to [-0.5, 0.5] after the out-of-frame flags are taken from
/// the raw distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub out_of_frame: OutOfFrame,
}

impl Margins {
    /// Left-minus-right imbalance; positive means the subject sits
    /// toward the right (more empty space on the left).
    pub fn horizontal_balance(&self) -> f64 {
        self.left - self.right
    }

    /// More empty space below than above the subject implies the camera
    /// looked down on it.
    pub fn is_high_angle(&self) -> bool {
        self.bottom > self.top
    }

    /// Subject's vertical position in the frame: 0 at the very top,
    /// 1 at the very bottom, 0.5 when the top/bottom split is degenerate.
    pub fn vertical_position(&self) -> f64 {
        let total = self.top + self.bottom;
        if total > 0.0 {
            self.top / total
        } else {
            0.5
        }
    }
}

/// Margins of the subject bounding box within the frame.
pub fn four_margins(keypoints: &KeypointSet, shape: FrameShape) -> Margins {
    let bbox = bounding_box(keypoints, shape);
    let w = shape.width_f();
    let h = shape.height_f();

    let raw_top = bbox.min_y / h;
    let raw_bottom = (h - bbox.max_y) / h;
    let raw_left = bbox.min_x / w;
    let raw_right = (w - bbox.max_x) / w;

    let clamp = |v: f64| v.clamp(-MARGIN_CLAMP, MARGIN_CLAMP);

    Margins {
        top: clamp(raw_top),
        bottom: clamp(raw_bottom),
        left: clamp(raw_left),
        right: clamp(raw_right),
        out_of_frame: OutOfFrame {
            top: raw_top < 0.0,
            bottom: raw_bottom < 0.0,
            left: raw_left < 0.0,
            right: raw_right < 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::keypoints::{BodyKeypoints, Keypoint};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn kp(x: f64, y: f64) -> Keypoint {
        Keypoint::new(x, y, 0.9)
    }

    fn shape() -> FrameShape {
        FrameShape::new(1000, 1000).unwrap()
    }

    fn subject(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> KeypointSet {
        KeypointSet {
            num_persons: 1,
            body: BodyKeypoints {
                nose: Some(kp(min_x, min_y)),
                left_ankle: Some(kp(max_x, max_y)),
                ..BodyKeypoints::default()
            },
            ..KeypointSet::default()
        }
    }

    // ── sign convention ─────────────────────────────────────────────

    #[test]
    fn test_inside_frame_all_positive() {
        let m = four_margins(&subject(200.0, 100.0, 800.0, 900.0), shape());
        assert_relative_eq!(m.top, 0.1);
        assert_relative_eq!(m.bottom, 0.1);
        assert_relative_eq!(m.left, 0.2);
        assert_relative_eq!(m.right, 0.2);
        assert!(!m.out_of_frame.any());
    }

    #[test]
    fn test_box_past_left_edge_is_negative_and_flagged() {
        // Extends 10% past the left edge
        let m = four_margins(&subject(-100.0, 100.0, 500.0, 900.0), shape());
        assert!(m.left < 0.0, "left margin should be negative");
        assert_relative_eq!(m.left, -0.1);
        assert!(m.out_of_frame.left);
        assert!(!m.out_of_frame.right);
        assert!(!m.out_of_frame.top);
        assert!(!m.out_of_frame.bottom);
    }

    #[test]
    fn test_flag_set_from_unclamped_value() {
        // 80% past the edge: numeric margin clamps to -0.5, flag still set
        let m = four_margins(&subject(-800.0, 100.0, 500.0, 900.0), shape());
        assert_relative_eq!(m.left, -0.5);
        assert!(m.out_of_frame.left);
    }

    #[test]
    fn test_large_positive_margin_clamped() {
        // Tiny subject in a corner: opposite margins exceed 0.5
        let m = four_margins(&subject(10.0, 10.0, 40.0, 40.0), shape());
        assert_relative_eq!(m.right, 0.5);
        assert_relative_eq!(m.bottom, 0.5);
        assert!(!m.out_of_frame.any());
    }

    #[test]
    fn test_no_person_defaults_to_quarter_margins() {
        let m = four_margins(&KeypointSet::default(), shape());
        assert_relative_eq!(m.top, 0.25);
        assert_relative_eq!(m.bottom, 0.25);
        assert_relative_eq!(m.left, 0.25);
        assert_relative_eq!(m.right, 0.25);
    }

    // ── derived measures ────────────────────────────────────────────

    #[test]
    fn test_horizontal_balance_positive_when_left_heavy() {
        let m = four_margins(&subject(400.0, 100.0, 900.0, 900.0), shape());
        assert!(m.horizontal_balance() > 0.0);
    }

    #[rstest]
    #[case::high_angle(100.0, 600.0, true)]
    #[case::low_angle(600.0, 100.0, false)]
    fn test_high_angle_detection(#[case] min_y: f64, #[case] below: f64, #[case] expected: bool) {
        let m = four_margins(&subject(200.0, min_y, 800.0, 1000.0 - below), shape());
        assert_eq!(m.is_high_angle(), expected);
    }

    #[test]
    fn test_vertical_position_top_heavy() {
        // top 0.4, bottom 0.1 → position 0.8 (subject near the bottom)
        let m = four_margins(&subject(200.0, 400.0, 800.0, 900.0), shape());
        assert_relative_eq!(m.vertical_position(), 0.8);
    }

    #[test]
    fn test_vertical_position_degenerate_split() {
        let m = Margins {
            top: 0.0,
            bottom: 0.0,
            left: 0.1,
            right: 0.1,
            out_of_frame: OutOfFrame::default(),
        };
        assert_relative_eq!(m.vertical_position(), 0.5);
    }
}
