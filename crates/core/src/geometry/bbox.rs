//! Subject bounding box from keypoint positions.

use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_BOX_INSET;
use crate::shared::frame::FrameShape;
use crate::shared::keypoints::KeypointSet;

/// Axis-aligned box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Union of all present body, face, and foot keypoints.
///
/// With zero keypoints this returns a box covering the middle 50% of
/// the frame in each axis, so downstream ratio computations always have
/// a defined subject to measure against.
pub fn bounding_box(keypoints: &KeypointSet, shape: FrameShape) -> BoundingBox {
    let points = keypoints
        .body
        .present()
        .chain(keypoints.face_landmarks.iter())
        .chain(keypoints.foot_keypoints.iter())
        .map(|kp| kp.position);

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut seen = false;

    for (x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
        seen = true;
    }

    if !seen {
        return BoundingBox {
            min_x: shape.width_f() * DEFAULT_BOX_INSET,
            min_y: shape.height_f() * DEFAULT_BOX_INSET,
            max_x: shape.width_f() * (1.0 - DEFAULT_BOX_INSET),
            max_y: shape.height_f() * (1.0 - DEFAULT_BOX_INSET),
        };
    }

    BoundingBox {
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

/// Fraction of the frame area the subject's bounding box covers, in [0, 1].
pub fn subject_area_ratio(keypoints: &KeypointSet, shape: FrameShape) -> f64 {
    let bbox = bounding_box(keypoints, shape);
    let frame_area = shape.width_f() * shape.height_f();
    (bbox.area() / frame_area).clamp(0.0, 1.0)
}
