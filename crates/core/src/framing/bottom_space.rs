//! Empty space below the subject (tables, foregrounds, floors).

use serde::{Deserialize, Serialize};

use super::band_score;

/// Above this, the area below the subject dominates the composition.
const TABLE_HEAVY_RATIO: f64 = 0.3;

/// Below this the frame is cutting visibly into the subject.
const CLIPPED_RATIO: f64 = -0.1;

/// Deviation from the reference that triggers a dedicated message.
const IMBALANCE_DELTA: f64 = 0.15;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BottomSpaceAnalysis {
    pub current: f64,
    pub reference: f64,
    pub difference: f64,
    pub score: f64,
    pub table_heavy: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub special_message: Option<String>,
}

impl BottomSpaceAnalysis {
    pub fn needs_adjustment(&self) -> bool {
        self.difference >= IMBALANCE_DELTA || self.current < CLIPPED_RATIO
    }
}

/// Compares the bottom margin against the reference. Input is the
/// signed bottom margin, so a clipped subject reads as negative space.
pub fn compare_bottom_space(current: f64, reference: f64) -> BottomSpaceAnalysis {
    let difference = (current - reference).abs();
    let score = band_score(difference);

    let special_message = if current < CLIPPED_RATIO {
        Some(
            "the bottom of the frame cuts into the subject; raise the camera or step back"
                .to_string(),
        )
    } else if current > reference + IMBALANCE_DELTA {
        Some(
            "too much empty space below the subject; lower the camera or move in".to_string(),
        )
    } else if current < reference - IMBALANCE_DELTA {
        Some(
            "not enough room below the subject; raise the camera or step back".to_string(),
        )
    } else {
        None
    };

    BottomSpaceAnalysis {
        current,
        reference,
        difference,
        score,
        table_heavy: current > TABLE_HEAVY_RATIO,
        special_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_matching_bottom_space_is_quiet() {
        let analysis = compare_bottom_space(0.12, 0.10);
        assert_relative_eq!(analysis.score, 95.0);
        assert!(analysis.special_message.is_none());
        assert!(!analysis.table_heavy);
        assert!(!analysis.needs_adjustment());
    }

    #[test]
    fn test_table_heavy_flagged_above_threshold() {
        let analysis = compare_bottom_space(0.35, 0.32);
        assert!(analysis.table_heavy);
        // Close to the reference, so no special message despite the flag
        assert!(analysis.special_message.is_none());
    }

    #[test]
    fn test_clipped_bottom_asks_to_raise_camera() {
        let analysis = compare_bottom_space(-0.15, 0.10);
        let msg = analysis.special_message.as_ref().unwrap();
        assert!(msg.contains("raise the camera"));
        assert!(analysis.needs_adjustment());
    }

    #[test]
    fn test_excess_bottom_asks_to_lower_or_move_in() {
        let analysis = compare_bottom_space(0.40, 0.10);
        assert!(analysis.special_message.unwrap().contains("lower the camera"));
    }

    #[test]
    fn test_missing_bottom_asks_for_more_room() {
        let analysis = compare_bottom_space(0.05, 0.30);
        assert!(analysis
            .special_message
            .unwrap()
            .contains("not enough room"));
    }

    #[rstest]
    #[case::slightly_more(0.20, 0.10)]
    #[case::slightly_less(0.02, 0.10)]
    fn test_small_deltas_have_no_message(#[case] current: f64, #[case] reference: f64) {
        assert!(compare_bottom_space(current, reference)
            .special_message
            .is_none());
    }
}
