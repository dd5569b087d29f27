//! Gate 0: frame aspect ratio.
//!
//! Bucket names are display-only; the score compares the two frames'
//! ratios directly, so frames under different bucket names can still
//! pass the gate.

use serde::{Deserialize, Serialize};

use crate::shared::frame::FrameShape;

/// Tolerance around each canonical ratio for naming and for the pass
/// region.
const RATIO_TOLERANCE: f64 = 0.1;

/// Canonical ratios checked in order.
const NAMED_RATIOS: &[(f64, &str)] = &[
    (1.0, "1:1 (square)"),
    (1.33, "4:3 (standard)"),
    (1.5, "3:2 (classic)"),
    (1.78, "16:9 (wide)"),
    (0.75, "3:4 (portrait)"),
    (0.67, "2:3 (portrait classic)"),
    (0.56, "9:16 (tall)"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioFeedback {
    pub current_ratio: f64,
    pub target_ratio: f64,
    pub current_name: String,
    pub target_name: String,
    pub action: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AspectRatioCheck {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<AspectRatioFeedback>,
}

/// Friendly name for a width/height ratio.
pub fn ratio_bucket_name(ratio: f64) -> String {
    for (canonical, name) in NAMED_RATIOS {
        if (ratio - canonical).abs() < RATIO_TOLERANCE {
            return (*name).to_string();
        }
    }
    if ratio > 1.0 {
        format!("{ratio:.2}:1 (landscape)")
    } else {
        format!("1:{:.2} (portrait)", 1.0 / ratio)
    }
}

/// Scores how closely the two frames' aspect ratios agree.
pub fn check_aspect_ratio(current: FrameShape, reference: FrameShape) -> AspectRatioCheck {
    let current_ratio = current.aspect_ratio();
    let target_ratio = reference.aspect_ratio();
    let diff = (current_ratio - target_ratio).abs();

    if diff < RATIO_TOLERANCE {
        return AspectRatioCheck {
            score: 100.0,
            feedback: None,
        };
    }

    let current_name = ratio_bucket_name(current_ratio);
    let target_name = ratio_bucket_name(target_ratio);
    let action = format!("switch the aspect ratio from {current_name} to {target_name}");

    AspectRatioCheck {
        score: (100.0 - diff * 100.0).max(30.0),
        feedback: Some(AspectRatioFeedback {
            current_ratio,
            target_ratio,
            current_name,
            target_name,
            action,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn shape(h: u32, w: u32) -> FrameShape {
        FrameShape::new(h, w).unwrap()
    }

    // ── bucket naming ───────────────────────────────────────────────

    #[rstest]
    #[case::square(1.0, "1:1 (square)")]
    #[case::standard(1.333, "4:3 (standard)")]
    #[case::classic(1.5, "3:2 (classic)")]
    #[case::wide(1.778, "16:9 (wide)")]
    #[case::portrait(0.75, "3:4 (portrait)")]
    #[case::tall(0.5625, "9:16 (tall)")]
    fn test_named_buckets(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(ratio_bucket_name(ratio), expected);
    }

    #[test]
    fn test_unnamed_landscape_falls_back_to_raw() {
        assert_eq!(ratio_bucket_name(2.35), "2.35:1 (landscape)");
    }

    #[test]
    fn test_unnamed_portrait_falls_back_to_raw() {
        assert_eq!(ratio_bucket_name(0.4), "1:2.50 (portrait)");
    }

    // ── scoring ─────────────────────────────────────────────────────

    #[test]
    fn test_matching_ratios_score_100() {
        let check = check_aspect_ratio(shape(1080, 1920), shape(720, 1280));
        assert_relative_eq!(check.score, 100.0);
        assert!(check.feedback.is_none());
    }

    #[test]
    fn test_near_ratios_inside_wider_pass_region() {
        // 1.5 vs 1.45: different buckets would be moot, diff < 0.1 passes
        let check = check_aspect_ratio(shape(1000, 1500), shape(1000, 1450));
        assert_relative_eq!(check.score, 100.0);
    }

    #[test]
    fn test_wide_vs_standard_mismatch() {
        // 1920x1080 (16:9) against 1440x1080 (4:3)
        let check = check_aspect_ratio(shape(1080, 1920), shape(1080, 1440));
        let expected = 100.0 - (1920.0 / 1080.0 - 1440.0 / 1080.0) * 100.0;
        assert_relative_eq!(check.score, expected, epsilon = 0.01);
        assert!(check.score > 55.0 && check.score < 56.0);

        let fb = check.feedback.unwrap();
        assert_eq!(fb.current_name, "16:9 (wide)");
        assert_eq!(fb.target_name, "4:3 (standard)");
        assert!(fb.action.contains("4:3"));
    }

    #[test]
    fn test_extreme_mismatch_floors_at_30() {
        // 16:9 landscape vs 9:16 portrait
        let check = check_aspect_ratio(shape(1080, 1920), shape(1920, 1080));
        assert_relative_eq!(check.score, 30.0);
    }
}
