//! Tunable scoring configuration.
//!
//! Thresholds and weights are deliberate tuning parameters, not
//! invariants; callers can override them per comparison.

use serde::{Deserialize, Serialize};

/// Minimum score for each scored gate to pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateThresholds {
    pub aspect_ratio: f64,
    pub framing: f64,
    pub composition: f64,
    pub compression: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            aspect_ratio: 90.0,
            framing: 70.0,
            composition: 75.0,
            compression: 80.0,
        }
    }
}

/// Relative weight of each framing sub-analysis. Must sum to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingWeights {
    pub shot_type: f64,
    pub subject_ratio: f64,
    pub bottom_space: f64,
    pub margins: f64,
}

impl Default for FramingWeights {
    fn default() -> Self {
        Self {
            shot_type: 0.25,
            subject_ratio: 0.35,
            bottom_space: 0.20,
            margins: 0.20,
        }
    }
}

impl FramingWeights {
    pub fn sum(&self) -> f64 {
        self.shot_type + self.subject_ratio + self.bottom_space + self.margins
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub thresholds: GateThresholds,
    pub weights: FramingWeights,
}
