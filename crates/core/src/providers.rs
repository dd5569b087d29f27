//! Boundary contracts for the external model collaborators.
//!
//! The comparison pipeline never invokes these itself; callers run them
//! (and cache their output) ahead of time, then hand over the finished
//! `KeypointSet` and compression scalar. The traits pin down what those
//! collaborators must guarantee.

use crate::geometry::bbox::BoundingBox;
use crate::shared::keypoints::KeypointSet;

/// Pose extraction over some caller-owned image type.
///
/// Implementations must return confidences in [0, 1], positions in the
/// image's own pixel coordinates, and entries pre-filtered against
/// `DETECTION_CONFIDENCE_THRESHOLD`. Zero detected persons is
/// `num_persons = 0` with every group empty, never an error.
///
/// Implementations may be stateful (e.g., warm model sessions), hence
/// `&mut self`.
pub trait KeypointProvider: Send {
    type Image;

    fn extract(&mut self, image: &Self::Image) -> Result<KeypointSet, Box<dyn std::error::Error>>;
}

/// Background-compression estimation from a depth model.
///
/// The returned scalar is relative only: monotonically higher means
/// more telephoto-like background compression, roughly 0–1 in
/// practice. No fixed physical calibration is implied.
pub trait CompressionEstimator: Send {
    type Image;

    fn estimate(
        &mut self,
        image: &Self::Image,
        subject: Option<&BoundingBox>,
    ) -> Result<f64, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned provider used to demonstrate the caller-side wiring.
    struct StubKeypointProvider {
        canned: KeypointSet,
    }

    impl KeypointProvider for StubKeypointProvider {
        type Image = Vec<u8>;

        fn extract(
            &mut self,
            _image: &Self::Image,
        ) -> Result<KeypointSet, Box<dyn std::error::Error>> {
            Ok(self.canned.clone())
        }
    }

    struct StubCompressionEstimator(f64);

    impl CompressionEstimator for StubCompressionEstimator {
        type Image = Vec<u8>;

        fn estimate(
            &mut self,
            _image: &Self::Image,
            _subject: Option<&BoundingBox>,
        ) -> Result<f64, Box<dyn std::error::Error>> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_stub_provider_round_trip() {
        let mut provider = StubKeypointProvider {
            canned: KeypointSet::default(),
        };
        let set = provider.extract(&vec![0u8; 16]).unwrap();
        assert_eq!(set.num_persons, 0);
    }

    #[test]
    fn test_stub_estimator_round_trip() {
        let mut estimator = StubCompressionEstimator(0.42);
        let value = estimator.estimate(&vec![0u8; 16], None).unwrap();
        assert_eq!(value, 0.42);
    }
}
