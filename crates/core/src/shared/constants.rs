/// Minimum confidence for a keypoint to count as detected.
///
/// Applied at the provider boundary: every `KeypointSet` handed to this
/// crate is expected to be pre-filtered against this cutoff, so a
/// present entry is always a trusted detection.
pub const DETECTION_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Face landmark count above which the landmark cloud is dense enough
/// to average into a face center.
pub const FACE_CENTER_MIN_LANDMARKS: usize = 30;

/// Fallback bounding box inset when no keypoints are present: the box
/// spans the middle of the frame from this fraction to its complement.
pub const DEFAULT_BOX_INSET: f64 = 0.25;

/// Margins are clamped to this magnitude in either direction.
pub const MARGIN_CLAMP: f64 = 0.5;
