//! Perceptual spacing between palette colors.
//!
//! Two colors count as "too similar" when their CIE76 ΔE in L*a*b* is below
//! [`MIN_DISTANCE`]. The threshold is fixed; ΔE of exactly 50 passes.

use cflash_color::Color;

/// Minimum L*a*b* distance between any two colors of a palette.
pub const MIN_DISTANCE: f32 = 50.0;

/// Whether a ΔE value falls below the spacing threshold.
#[inline]
#[must_use]
pub fn below_threshold(delta_e: f32) -> bool {
    delta_e < MIN_DISTANCE
}

/// Whether `candidate` is perceptually too close to any accepted color.
///
/// Stops at the first offending color. An empty `accepted` list never
/// rejects.
#[must_use]
pub fn is_too_similar(candidate: Color, accepted: &[Color]) -> bool {
    let lab = candidate.to_lab();
    accepted.iter().any(|c| below_threshold(lab.distance(&c.to_lab())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_accepts() {
        assert!(!is_too_similar(Color::rgb8(1, 2, 3), &[]));
    }

    #[test]
    fn identical_is_too_similar() {
        let c = Color::rgb8(200, 40, 40);
        assert!(is_too_similar(c, &[c]));
    }

    #[test]
    fn black_and_white_are_distinct() {
        assert!(!is_too_similar(Color::BLACK, &[Color::WHITE]));
    }

    #[test]
    fn any_close_color_rejects() {
        let candidate = Color::rgb8(250, 0, 0);
        let accepted = [Color::BLACK, Color::WHITE, Color::rgb8(255, 10, 10)];
        assert!(is_too_similar(candidate, &accepted));
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        assert!(below_threshold(49.999));
        assert!(!below_threshold(50.0));
        assert!(!below_threshold(50.001));
    }

    #[test]
    fn agrees_with_lab_distance() {
        let pairs = [
            (Color::rgb8(255, 0, 0), Color::rgb8(0, 0, 255)),
            (Color::rgb8(120, 120, 120), Color::rgb8(160, 160, 160)),
            (Color::rgb8(30, 200, 90), Color::rgb8(60, 120, 200)),
            (Color::rgb8(250, 250, 0), Color::rgb8(255, 160, 0)),
        ];
        for (a, b) in pairs {
            let expected = a.distance(&b) < MIN_DISTANCE;
            assert_eq!(is_too_similar(a, &[b]), expected, "{a} vs {b}");
        }
    }
}
