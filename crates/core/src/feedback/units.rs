//! Conversions from abstract frame percentages to physical instructions.
//!
//! Single authority for the step-count and tilt-angle lookups; framing,
//! composition, and compression feedback all phrase movement through
//! these so the advice stays consistent across gates.

/// Rough walking distance for a horizontal reframe of `percent` of the
/// frame width.
pub fn steps_for_percent(percent: f64) -> &'static str {
    if percent < 5.0 {
        "barely a step"
    } else if percent < 10.0 {
        "half a step"
    } else if percent < 20.0 {
        "one step"
    } else if percent < 30.0 {
        "two steps"
    } else if percent < 40.0 {
        "three steps"
    } else {
        "four or more steps"
    }
}

/// Camera tilt in degrees for a vertical reframe of `percent` of the
/// frame height. Capped at 15 degrees.
pub fn tilt_angle_for_percent(percent: f64) -> u32 {
    if percent < 5.0 {
        2
    } else if percent < 10.0 {
        5
    } else if percent < 15.0 {
        8
    } else if percent < 20.0 {
        10
    } else {
        ((percent * 0.5) as u32).min(15)
    }
}
