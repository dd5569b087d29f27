pub mod analyzer;
pub mod balance;
pub mod bottom_space;
pub mod orientation;
pub mod shot_type;
pub mod subject_ratio;

/// Shared score bands for absolute-difference comparisons (subject
/// ratio, bottom space, per-direction margins).
pub(crate) fn band_score(diff: f64) -> f64 {
    let diff = diff.abs();
    if diff < 0.05 {
        95.0
    } else if diff < 0.10 {
        85.0
    } else if diff < 0.15 {
        75.0
    } else {
        (90.0 - diff * 100.0).max(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::band_score;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::near_match(0.03, 95.0)]
    #[case::close(0.08, 85.0)]
    #[case::off(0.12, 75.0)]
    #[case::far(0.15, 75.0)]
    #[case::floor(0.40, 60.0)]
    fn test_band_scores(#[case] diff: f64, #[case] expected: f64) {
        assert_relative_eq!(band_score(diff), expected);
    }

    #[test]
    fn test_negative_diff_uses_magnitude() {
        assert_relative_eq!(band_score(-0.08), 85.0);
    }
}
