// SPDX-License-Identifier: MIT
//
// cflash color system — 8-bit sRGB at rest, HSV for generation, CIE LAB
// for perceptual comparison.
//
// Single-character variable names (r, g, b, h, s, v, l, a) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Palettes are generated in HSV (hue angle + two fractions), stored and
// printed as `#rrggbb`, and compared in CIE L*a*b* where Euclidean distance
// approximates what a viewer perceives as "different".
//
// Conversion pipeline:
//
//   HSV → sRGB (u8)  ↔  Linear sRGB → XYZ (D65) → L*a*b*

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color, the unit a palette is made of.
///
/// # Examples
///
/// ```
/// use cflash_color::color::Color;
///
/// // From HSV (hue in degrees, saturation and brightness as fractions)
/// let red = Color::hsv(0.0, 1.0, 1.0);
/// assert_eq!(red.to_hex(), "#ff0000");
///
/// // From hex (case-insensitive, hash optional)
/// let teal = Color::hex("#008080").unwrap();
///
/// // Perceptual distance in CIE LAB
/// assert!(red.distance(&teal) > 50.0);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Pure black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[inline]
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from sRGB values (0.0 to 1.0, clamped).
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgb8(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Create a color from HSV.
    ///
    /// - `h`: hue angle in degrees, wrapped into [0, 360)
    /// - `s`: saturation, clamped to [0, 1]
    /// - `v`: brightness (value), clamped to [0, 1]
    ///
    /// Clamping happens here so formula outputs above 1.0 never reach the
    /// channel math.
    #[must_use]
    pub fn hsv(h: f32, s: f32, v: f32) -> Self {
        let (r, g, b) = hsv_to_srgb(Hsv::new(h, s, v).clamped());
        Self::srgb(r, g, b)
    }

    /// Create a color from an [`Hsv`] triple (see [`Color::hsv`]).
    #[inline]
    #[must_use]
    pub fn from_hsv(hsv: Hsv) -> Self {
        Self::hsv(hsv.h, hsv.s, hsv.v)
    }

    /// Create a color from a hex string.
    ///
    /// Supports: `#RGB` and `#RRGGBB`, with or without `#`, any case.
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// sRGB components as fractions (0.0–1.0).
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Convert to HSV. Achromatic colors report hue 0.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = self.to_srgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else if (max - r).abs() <= f32::EPSILON {
            60.0 * ((g - b) / delta)
        } else if (max - g).abs() <= f32::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max <= 0.0 { 0.0 } else { delta / max };

        Hsv::new(normalize_hue(h), s, max)
    }

    /// Convert to CIE L*a*b* (D65 reference white).
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let (r, g, b) = self.to_srgb();
        let (x, y, z) = linear_srgb_to_xyz(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
        xyz_to_lab(x, y, z)
    }

    /// Perceptual distance to another color (CIE76 ΔE in L*a*b*).
    ///
    /// 0 means identical; black and white are 100 apart.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        self.to_lab().distance(&other.to_lab())
    }

    /// Lowercase hex string (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase hex string (`#RRGGBB`), as printed on card labels.
    #[must_use]
    pub fn to_hex_upper(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when a string is not a `#RGB` / `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s.trim()).ok_or_else(|| ParseColorError(s.to_owned()))
    }
}

// ─── Hsv ─────────────────────────────────────────────────────────────────────

/// Hue / saturation / brightness triple.
///
/// `h` is in degrees; `s` and `v` are nominally fractions but are not
/// clamped on construction. Generation formulas may overshoot;
/// [`Hsv::clamped`] is applied at the point of conversion to RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    #[inline]
    #[must_use]
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Hue wrapped into [0, 360), saturation and brightness clamped to [0, 1].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            h: normalize_hue(self.h),
            s: self.s.clamp(0.0, 1.0),
            v: self.v.clamp(0.0, 1.0),
        }
    }
}

// ─── Lab ─────────────────────────────────────────────────────────────────────

/// A color in CIE L*a*b* space.
///
/// `l` runs 0 (black) to 100 (white); `a` is green–red, `b` blue–yellow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    /// Euclidean distance (CIE76 ΔE).
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// HSV (already clamped) → sRGB fractions.
fn hsv_to_srgb(hsv: Hsv) -> (f32, f32, f32) {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        return (v, v, v);
    }

    let sector = h / 60.0;
    let f = sector - sector.floor();
    let p = v * (1.0 - s);
    let q = v * s.mul_add(-f, 1.0);
    let t = v * s.mul_add(f - 1.0, 1.0);

    // Truncation is the point: `sector` is in [0, 6).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    match sector.floor() as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

// ─── sRGB ↔ Linear sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Linear sRGB → XYZ → L*a*b* ─────────────────────────────────────────────

/// D65 reference white.
const XN: f32 = 0.950_470;
const YN: f32 = 1.0;
const ZN: f32 = 1.088_830;

/// Thresholds of the piecewise L*a*b* transfer function (6/29 based).
const T0: f32 = 4.0 / 29.0;
const T2: f32 = 3.0 * (6.0 / 29.0) * (6.0 / 29.0);
const T3: f32 = (6.0 / 29.0) * (6.0 / 29.0) * (6.0 / 29.0);

#[inline]
fn linear_srgb_to_xyz(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let x = 0.180_437_5f32.mul_add(b, 0.412_456_4f32.mul_add(r, 0.357_576_1 * g));
    let y = 0.072_175f32.mul_add(b, 0.212_672_9f32.mul_add(r, 0.715_152_2 * g));
    let z = 0.950_304_1f32.mul_add(b, 0.019_333_9f32.mul_add(r, 0.119_192 * g));
    (x, y, z)
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

#[inline]
fn xyz_to_lab(x: f32, y: f32, z: f32) -> Lab {
    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);
    Lab {
        l: 116.0f32.mul_add(fy, -16.0).max(0.0),
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    // ── HSV → RGB ────────────────────────────────────────────────────────

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::hsv(0.0, 1.0, 1.0), Color::rgb8(255, 0, 0));
        assert_eq!(Color::hsv(120.0, 1.0, 1.0), Color::rgb8(0, 255, 0));
        assert_eq!(Color::hsv(240.0, 1.0, 1.0), Color::rgb8(0, 0, 255));
    }

    #[test]
    fn hsv_secondaries() {
        assert_eq!(Color::hsv(60.0, 1.0, 1.0), Color::rgb8(255, 255, 0));
        assert_eq!(Color::hsv(180.0, 1.0, 1.0), Color::rgb8(0, 255, 255));
        assert_eq!(Color::hsv(300.0, 1.0, 1.0), Color::rgb8(255, 0, 255));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        assert_eq!(Color::hsv(200.0, 0.0, 0.5), Color::rgb8(128, 128, 128));
    }

    #[test]
    fn hsv_zero_brightness_is_black() {
        assert_eq!(Color::hsv(77.0, 0.9, 0.0), Color::BLACK);
    }

    #[test]
    fn hsv_hue_wraps() {
        assert_eq!(Color::hsv(360.0, 1.0, 1.0), Color::hsv(0.0, 1.0, 1.0));
        assert_eq!(Color::hsv(-120.0, 1.0, 1.0), Color::hsv(240.0, 1.0, 1.0));
        assert_eq!(Color::hsv(480.0, 1.0, 1.0), Color::hsv(120.0, 1.0, 1.0));
    }

    #[test]
    fn hsv_clamps_overshoot() {
        // Monochromatic formulas overshoot 1.0 for later cards.
        assert_eq!(Color::hsv(30.0, 1.4, 1.25), Color::hsv(30.0, 1.0, 1.0));
        assert_eq!(Color::hsv(30.0, -0.2, 0.5), Color::hsv(30.0, 0.0, 0.5));
    }

    #[test]
    fn hsv_midrange() {
        // s = v = 0.875 at hue 0 → (223, 28, 28)
        assert_eq!(Color::hsv(0.0, 0.875, 0.875), Color::rgb8(223, 28, 28));
    }

    // ── RGB → HSV ────────────────────────────────────────────────────────

    #[test]
    fn to_hsv_roundtrip_hue() {
        for hue in [0.0, 45.0, 120.0, 200.0, 300.0] {
            let hsv = Color::hsv(hue, 1.0, 1.0).to_hsv();
            assert!(approx_eq(hsv.h, hue, 1.0), "hue {hue} came back as {}", hsv.h);
            assert!(approx_eq(hsv.s, 1.0, 1e-3));
            assert!(approx_eq(hsv.v, 1.0, 1e-3));
        }
    }

    #[test]
    fn to_hsv_gray_has_zero_hue() {
        let hsv = Color::rgb8(90, 90, 90).to_hsv();
        assert!(approx_eq(hsv.h, 0.0, 1e-6));
        assert!(approx_eq(hsv.s, 0.0, 1e-6));
    }

    // ── LAB ──────────────────────────────────────────────────────────────

    #[test]
    fn white_lab() {
        let lab = Color::WHITE.to_lab();
        assert!(approx_eq(lab.l, 100.0, 0.05), "L = {}", lab.l);
        assert!(approx_eq(lab.a, 0.0, 0.05), "a = {}", lab.a);
        assert!(approx_eq(lab.b, 0.0, 0.05), "b = {}", lab.b);
    }

    #[test]
    fn black_lab() {
        let lab = Color::BLACK.to_lab();
        assert!(approx_eq(lab.l, 0.0, 1e-3));
        assert!(approx_eq(lab.a, 0.0, 1e-3));
        assert!(approx_eq(lab.b, 0.0, 1e-3));
    }

    #[test]
    fn red_lab_reference() {
        let lab = Color::rgb8(255, 0, 0).to_lab();
        assert!(approx_eq(lab.l, 53.24, 0.1), "L = {}", lab.l);
        assert!(approx_eq(lab.a, 80.09, 0.2), "a = {}", lab.a);
        assert!(approx_eq(lab.b, 67.20, 0.2), "b = {}", lab.b);
    }

    #[test]
    fn black_white_distance_is_100() {
        assert!(approx_eq(Color::BLACK.distance(&Color::WHITE), 100.0, 0.05));
    }

    #[test]
    fn identical_colors_have_zero_distance() {
        let c = Color::rgb8(12, 200, 99);
        assert!(approx_eq(c.distance(&c), 0.0, 1e-6));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Color::rgb8(240, 10, 90);
        let b = Color::rgb8(20, 140, 200);
        assert!(approx_eq(a.distance(&b), b.distance(&a), 1e-4));
    }

    #[test]
    fn near_colors_are_close() {
        let a = Color::rgb8(100, 100, 100);
        let b = Color::rgb8(104, 100, 100);
        assert!(a.distance(&b) < 3.0);
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        assert_eq!(Color::hex("#1a2B3c"), Some(Color::rgb8(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn hex_parsing_short() {
        assert_eq!(Color::hex("#f0a"), Some(Color::rgb8(0xff, 0x00, 0xaa)));
    }

    #[test]
    fn hex_parsing_no_hash() {
        assert_eq!(Color::hex("00FF7f"), Some(Color::rgb8(0, 255, 127)));
    }

    #[test]
    fn hex_parsing_invalid() {
        assert_eq!(Color::hex("#12345"), None);
        assert_eq!(Color::hex("#gg0000"), None);
        assert_eq!(Color::hex(""), None);
        assert_eq!(Color::hex("#ff0000ff"), None);
    }

    #[test]
    fn hex_output_forms() {
        let c = Color::rgb8(0xab, 0x0c, 0xde);
        assert_eq!(c.to_hex(), "#ab0cde");
        assert_eq!(c.to_hex_upper(), "#AB0CDE");
        assert_eq!(c.to_string(), "#ab0cde");
        assert_eq!(format!("{c:?}"), "Color(#ab0cde)");
    }

    #[test]
    fn from_str_trims_and_reports() {
        assert_eq!(" #123456 ".parse::<Color>(), Ok(Color::rgb8(0x12, 0x34, 0x56)));
        let err = "blue".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), "invalid hex color: \"blue\"");
    }

    #[test]
    fn normalize_hue_range() {
        assert!(approx_eq(normalize_hue(-30.0), 330.0, 1e-4));
        assert!(approx_eq(normalize_hue(720.0), 0.0, 1e-4));
        assert!(normalize_hue(-1e-9) < 360.0);
    }
}
