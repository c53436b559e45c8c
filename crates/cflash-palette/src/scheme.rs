//! Harmony schemes — how a palette's colors relate to its base hue.
//!
//! Each scheme maps `(base_hue, index)` to one HSV color. The hue follows a
//! fixed rotation rule around the wheel; saturation and brightness are drawn
//! from a scheme-specific band so repeated palettes don't look identical.
//! `index` is the color's position in the palette being built, not the
//! number of attempts made so far.

use std::fmt;
use std::str::FromStr;

use cflash_color::color::{Hsv, normalize_hue};
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::mask::GamutMask;
use crate::random::RandomSource;

/// The kind of harmony used to generate a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    /// Opposite the base hue, fanning out 30° per extra color.
    #[default]
    Complementary,
    /// Base hue only; saturation and brightness climb with each color.
    Monochromatic,
    /// Neighbors 30° apart, starting one step below the base.
    Analogous,
    /// 120° spacing.
    Triadic,
    /// Any hue admitted by the selected [`GamutMask`].
    #[serde(alias = "gamut-mask")]
    GamutMask,
}

impl Scheme {
    /// Machine name, as accepted on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::GamutMask => "gamutMask",
        }
    }

    /// Parse a scheme from its name (case-insensitive; `gamut-mask` also works).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("gamut-mask") {
            return Some(Self::GamutMask);
        }
        Self::all().iter().find(|s| s.name().eq_ignore_ascii_case(name)).copied()
    }

    /// All schemes, in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary,
            Self::Monochromatic,
            Self::Analogous,
            Self::Triadic,
            Self::GamutMask,
        ]
    }

    /// Title shown above a palette: `"Triadic"`, or
    /// `"Gamut Mask: Y-Shape Split"` with the active mask.
    #[must_use]
    pub fn display_name(self, mask: GamutMask) -> String {
        match self {
            Self::Complementary => "Complementary".to_owned(),
            Self::Monochromatic => "Monochromatic".to_owned(),
            Self::Analogous => "Analogous".to_owned(),
            Self::Triadic => "Triadic".to_owned(),
            Self::GamutMask => format!("Gamut Mask: {}", mask.name()),
        }
    }

    /// Generate the color at position `index` of a palette anchored at
    /// `base_hue`.
    ///
    /// The returned hue is in [0, 360). Saturation and brightness are the raw
    /// formula output and may exceed 1.0 for late monochromatic colors;
    /// [`cflash_color::Color::from_hsv`] clamps them.
    ///
    /// Random draws happen in a fixed order: mask hue draws (gamut mask only),
    /// then saturation, then brightness. `mask` is ignored by every other
    /// scheme.
    pub fn color_at(
        self,
        base_hue: f32,
        index: usize,
        mask: GamutMask,
        rng: &mut impl RandomSource,
    ) -> Hsv {
        #[allow(clippy::cast_precision_loss)]
        let i = index as f32;

        match self {
            Self::Complementary => {
                let fan = if index > 1 { (i - 1.0) * 30.0 } else { 0.0 };
                let h = normalize_hue(base_hue + 180.0 + fan);
                let s = rng.range(0.85, 0.15);
                let v = rng.range(0.75, 0.25);
                Hsv::new(h, s, v)
            }
            Self::Monochromatic => {
                let h = normalize_hue(base_hue);
                let s = 0.2f32.mul_add(i, rng.range(0.3, 0.2));
                let v = 0.15f32.mul_add(i, rng.range(0.4, 0.2));
                Hsv::new(h, s, v)
            }
            Self::Analogous => {
                let h = normalize_hue(30.0f32.mul_add(i - 1.0, base_hue));
                let s = rng.range(0.7, 0.3);
                let v = rng.range(0.7, 0.3);
                Hsv::new(h, s, v)
            }
            Self::Triadic => {
                let h = normalize_hue(120.0f32.mul_add(i, base_hue));
                let s = rng.range(0.75, 0.25);
                let v = rng.range(0.75, 0.25);
                Hsv::new(h, s, v)
            }
            Self::GamutMask => {
                let h = normalize_hue(mask.sample_hue(base_hue, rng));
                let s = rng.range(0.7, 0.3);
                let v = rng.range(0.7, 0.3);
                Hsv::new(h, s, v)
            }
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownScheme(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
