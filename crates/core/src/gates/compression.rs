//! Gate 3: background compression.
//!
//! The compression index is a relative scalar from the depth
//! collaborator (higher = more telephoto-like flattening). Advice stays
//! relative (move and zoom), with no absolute focal-length claims.

use serde::{Deserialize, Serialize};

/// Score when the depth collaborator supplied no signal; sits at the
/// pass threshold so a missing signal never blocks the pipeline.
pub const MISSING_SIGNAL_SCORE: f64 = 80.0;

/// Difference below which the compression matches.
const MATCH_TOLERANCE: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionFeedback {
    pub current: f64,
    pub target: f64,
    pub current_character: String,
    pub target_character: String,
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionCheck {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<CompressionFeedback>,
}

/// Rough lens character for a compression value, for display only.
pub fn lens_character(value: f64) -> &'static str {
    if value < 0.3 {
        "wide-angle"
    } else if value < 0.45 {
        "semi-wide"
    } else if value < 0.6 {
        "normal"
    } else if value < 0.75 {
        "medium telephoto"
    } else {
        "telephoto"
    }
}

fn intensity(diff: f64) -> &'static str {
    if diff < 0.1 {
        "barely"
    } else if diff < 0.2 {
        "a little"
    } else if diff < 0.3 {
        "somewhat"
    } else {
        "quite a bit"
    }
}

fn distance_estimate(diff: f64) -> &'static str {
    if diff < 0.15 {
        "a step or two"
    } else if diff < 0.3 {
        "three or four steps"
    } else {
        "a considerable distance"
    }
}

/// Compares compression indices; either side missing yields the neutral
/// pass-level score.
pub fn check_compression(current: Option<f64>, reference: Option<f64>) -> CompressionCheck {
    let (current, target) = match (current, reference) {
        (Some(c), Some(r)) => (c, r),
        _ => {
            return CompressionCheck {
                score: MISSING_SIGNAL_SCORE,
                feedback: None,
            }
        }
    };

    let diff = (target - current).abs();

    if diff < MATCH_TOLERANCE {
        return CompressionCheck {
            score: 90.0,
            feedback: None,
        };
    }

    let score = if diff < 0.2 {
        95.0 - (diff - 0.05) * 100.0
    } else if diff < 0.4 {
        80.0 - (diff - 0.2) * 75.0
    } else {
        (65.0 - (diff - 0.4) * 50.0).max(50.0)
    };

    let how_much = intensity(diff);
    let distance = distance_estimate(diff);
    let actions = if current < target {
        vec![
            format!("step back {how_much} and zoom in to pull the background closer"),
            format!("expect to move {distance}"),
        ]
    } else {
        vec![
            format!("move in {how_much} and zoom out to open the background up"),
            format!("expect to move {distance}"),
        ]
    };

    CompressionCheck {
        score,
        feedback: Some(CompressionFeedback {
            current,
            target,
            current_character: lens_character(current).to_string(),
            target_character: lens_character(target).to_string(),
            actions,
        }),
    }
}
