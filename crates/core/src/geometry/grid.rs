//! Face center estimation and rule-of-thirds grid mapping.

use crate::shared::constants::FACE_CENTER_MIN_LANDMARKS;
use crate::shared::frame::FrameShape;
use crate::shared::keypoints::KeypointSet;

/// Estimated face center in normalized [0, 1] coordinates.
///
/// Prefers the mean of a dense face-landmark cloud, falls back to the
/// nose joint, then to the shoulder midpoint lifted by 10% of frame
/// height (roughly where the face sits above the shoulders). `None`
/// when no person or everything face-adjacent is occluded.
pub fn face_center(keypoints: &KeypointSet, shape: FrameShape) -> Option<(f64, f64)> {
    if !keypoints.has_person() {
        return None;
    }

    let w = shape.width_f();
    let h = shape.height_f();

    if keypoints.face_landmarks.len() > FACE_CENTER_MIN_LANDMARKS {
        let n = keypoints.face_landmarks.len() as f64;
        let (sum_x, sum_y) = keypoints
            .face_landmarks
            .iter()
            .fold((0.0, 0.0), |(sx, sy), kp| (sx + kp.x(), sy + kp.y()));
        return Some((sum_x / n / w, sum_y / n / h));
    }

    if let Some(nose) = &keypoints.body.nose {
        return Some((nose.x() / w, nose.y() / h));
    }

    if let (Some(left), Some(right)) = (&keypoints.body.left_shoulder, &keypoints.body.right_shoulder)
    {
        let mid_x = (left.x() + right.x()) / 2.0;
        let mid_y = (left.y() + right.y()) / 2.0 - h * 0.1;
        return Some((mid_x / w, mid_y / h));
    }

    None
}

/// Maps a normalized point into its rule-of-thirds cell, columns and
/// rows numbered 1..=3.
pub fn grid_position(point: (f64, f64)) -> (u8, u8) {
    let cell = |coord: f64| ((coord * 3.0).floor() as i64 + 1).clamp(1, 3) as u8;
    (cell(point.0), cell(point.1))
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

    fn dense_face_at(cx: f64, cy: f64) -> KeypointSet {
        // 32 landmarks in a tight cluster around (cx, cy)
        let face_landmarks = (0..32)
            .map(|i| kp(cx + (i % 4) as f64 - 1.5, cy + (i / 4) as f64 - 3.5))
            .collect();
        KeypointSet {
            num_persons: 1,
            face_landmarks,
            ..KeypointSet::default()
        }
    }

    // ── face_center fallback chain ──────────────────────────────────

    #[test]
    fn test_dense_landmarks_averaged() {
        let set = dense_face_at(500.0, 300.0);
        let (x, y) = face_center(&set, shape()).unwrap();
        assert_relative_eq!(x, 0.5, epsilon = 0.01);
        assert_relative_eq!(y, 0.3, epsilon = 0.01);
    }

    #[test]
    fn test_sparse_landmarks_fall_back_to_nose() {
        let set = KeypointSet {
            num_persons: 1,
            body: BodyKeypoints {
                nose: Some(kp(250.0, 200.0)),
                ..BodyKeypoints::default()
            },
            face_landmarks: vec![kp(900.0, 900.0); 5],
            ..KeypointSet::default()
        };
        let (x, y) = face_center(&set, shape()).unwrap();
        assert_relative_eq!(x, 0.25);
        assert_relative_eq!(y, 0.2);
    }

    #[test]
    fn test_shoulder_midpoint_lifted() {
        let set = KeypointSet {
            num_persons: 1,
            body: BodyKeypoints {
                left_shoulder: Some(kp(400.0, 500.0)),
                right_shoulder: Some(kp(600.0, 500.0)),
                ..BodyKeypoints::default()
            },
            ..KeypointSet::default()
        };
        let (x, y) = face_center(&set, shape()).unwrap();
        assert_relative_eq!(x, 0.5);
        // Shoulder y 0.5, lifted by 10% of frame height
        assert_relative_eq!(y, 0.4);
    }

    #[test]
    fn test_no_person_returns_none() {
        assert!(face_center(&KeypointSet::default(), shape()).is_none());
    }

    #[test]
    fn test_person_with_no_face_or_shoulders_returns_none() {
        let set = KeypointSet {
            num_persons: 1,
            body: BodyKeypoints {
                left_hip: Some(kp(500.0, 600.0)),
                ..BodyKeypoints::default()
            },
            ..KeypointSet::default()
        };
        assert!(face_center(&set, shape()).is_none());
    }

    // ── grid_position ───────────────────────────────────────────────

    #[rstest]
    #[case::top_left((0.1, 0.1), (1, 1))]
    #[case::center((0.5, 0.5), (2, 2))]
    #[case::bottom_right((0.9, 0.9), (3, 3))]
    #[case::right_edge_clamped((1.0, 0.5), (3, 2))]
    #[case::just_past_boundaries((0.34, 0.67), (2, 3))]
    fn test_grid_cells(#[case] point: (f64, f64), #[case] expected: (u8, u8)) {
        assert_eq!(grid_position(point), expected);
    }
}
