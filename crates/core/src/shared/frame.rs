//! Frame-level value types shared across the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keypoints::KeypointSet;

#[derive(Error, Debug)]
pub enum FrameShapeError {
    #[error("degenerate frame shape {width}x{height}: both dimensions must be non-zero")]
    Degenerate { width: u32, height: u32 },
}

/// Pixel dimensions of a frame. Source of all ratio normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameShape {
    pub height: u32,
    pub width: u32,
}

impl FrameShape {
    pub fn new(height: u32, width: u32) -> Result<Self, FrameShapeError> {
        let shape = Self { height, width };
        shape.validate()?;
        Ok(shape)
    }

    /// Shapes can also arrive through deserialization, so validity is
    /// re-checked at the comparison entry point.
    pub fn validate(&self) -> Result<(), FrameShapeError> {
        if self.height == 0 || self.width == 0 {
            return Err(FrameShapeError::Degenerate {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn width_f(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f(&self) -> f64 {
        self.height as f64
    }
}

/// Everything known about one analyzed image: its dimensions, the
/// provider's keypoints, and the optional background-compression scalar
/// from the depth collaborator.
///
/// This is the unit a caching layer stores per reference image and
/// replays for every live frame; the comparison never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub shape: FrameShape,
    pub keypoints: KeypointSet,
    #[serde(default)]
    pub compression: Option<f64>,
}

impl FrameAnalysis {
    pub fn new(shape: FrameShape, keypoints: KeypointSet) -> Self {
        Self {
            shape,
            keypoints,
            compression: None,
        }
    }

    pub fn with_compression(mut self, compression: f64) -> Self {
        self.compression = Some(compression);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_valid_shape() {
        let shape = FrameShape::new(1080, 1920).unwrap();
        assert_relative_eq!(shape.aspect_ratio(), 1920.0 / 1080.0);
    }

    #[rstest]
    #[case::zero_width(1080, 0)]
    #[case::zero_height(0, 1920)]
    #[case::both_zero(0, 0)]
    fn test_degenerate_shape_rejected(#[case] height: u32, #[case] width: u32) {
        assert!(FrameShape::new(height, width).is_err());
    }

    #[test]
    fn test_validate_catches_deserialized_zero() {
        let shape: FrameShape = serde_json::from_str(r#"{"height":0,"width":640}"#).unwrap();
        assert!(shape.validate().is_err());
    }

    #[test]
    fn test_analysis_compression_defaults_to_none() {
        let json = r#"{"shape":{"height":100,"width":100},"keypoints":{"num_persons":0}}"#;
        let analysis: FrameAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.compression.is_none());
    }
}
