// SPDX-License-Identifier: MIT
//
// WCAG contrast helpers for text drawn on top of a palette swatch.
//
// A card prints its own hex code over its background. Whether that label is
// black or white is decided by the WCAG 2.1 contrast ratio, which is defined
// on sRGB relative luminance.

use crate::color::{Color, srgb_to_linear};

/// Compute the relative luminance of a color per WCAG 2.1.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = f64::from(srgb_to_linear(r));
    let g_lin = f64::from(srgb_to_linear(g));
    let b_lin = f64::from(srgb_to_linear(b));
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0], independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick black or white text for a label drawn on `background`,
/// whichever reads better.
#[must_use]
pub fn label_color(background: Color) -> Color {
    if contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_white_ratio_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn ratio_is_order_independent() {
        let a = Color::rgb8(200, 30, 60);
        let b = Color::rgb8(10, 40, 90);
        assert!((contrast_ratio(a, b) - contrast_ratio(b, a)).abs() < 1e-12);
    }

    #[test]
    fn same_color_ratio_is_one() {
        let c = Color::rgb8(77, 77, 200);
        assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn luminance_bounds() {
        assert!(relative_luminance(Color::BLACK).abs() < 1e-9);
        assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn label_on_light_swatch_is_black() {
        assert_eq!(label_color(Color::rgb8(255, 240, 120)), Color::BLACK);
        assert_eq!(label_color(Color::WHITE), Color::BLACK);
    }

    #[test]
    fn label_on_dark_swatch_is_white() {
        assert_eq!(label_color(Color::rgb8(20, 20, 90)), Color::WHITE);
        assert_eq!(label_color(Color::BLACK), Color::WHITE);
    }
}
