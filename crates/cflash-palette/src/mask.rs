//! Gamut masks — regions of the hue wheel a palette may draw from.
//!
//! A mask is a predicate over the angle between a candidate hue and the
//! palette's base hue. Hues are sampled by rejection: draw uniformly around
//! the wheel until one lands inside the mask, or give up after
//! [`MASK_ATTEMPTS`] draws and fall back to the base hue.

use std::fmt;

use cflash_color::color::normalize_hue;
use tracing::trace;

use crate::random::RandomSource;

/// Uniform hue draws allowed before [`GamutMask::sample_hue`] gives up.
pub const MASK_ATTEMPTS: usize = 100;

/// The fixed catalog of mask shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamutMask {
    /// Base wedge plus a slice across the wheel.
    ComplementarySplit,
    /// Three slices roughly 120° apart.
    TriadicSplit,
    /// Base wedge plus two slices flanking the complement.
    YShapeSplit,
    /// One wide wedge starting at the base hue.
    AnalogousSlice,
}

impl GamutMask {
    /// All masks, in catalog order. Index `i` here is mask index `i`.
    pub const CATALOG: [Self; 4] = [
        Self::ComplementarySplit,
        Self::TriadicSplit,
        Self::YShapeSplit,
        Self::AnalogousSlice,
    ];

    /// Select a mask by index, wrapping modulo the catalog size.
    /// Negative indices wrap too (`-1` is the last mask).
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        let i = index.rem_euclid(Self::CATALOG.len() as i64) as usize;
        Self::CATALOG[i]
    }

    /// Position of this mask in [`GamutMask::CATALOG`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ComplementarySplit => 0,
            Self::TriadicSplit => 1,
            Self::YShapeSplit => 2,
            Self::AnalogousSlice => 3,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ComplementarySplit => "Complementary Split",
            Self::TriadicSplit => "Triadic Split",
            Self::YShapeSplit => "Y-Shape Split",
            Self::AnalogousSlice => "Analogous Slice",
        }
    }

    /// Whether `angle` (degrees from the base hue, in [0, 360)) lies inside.
    #[must_use]
    pub fn admits_angle(self, angle: f32) -> bool {
        match self {
            Self::ComplementarySplit => angle < 60.0 || (angle > 170.0 && angle < 230.0),
            Self::TriadicSplit => {
                angle < 40.0
                    || (angle > 115.0 && angle < 155.0)
                    || (angle > 235.0 && angle < 275.0)
            }
            Self::YShapeSplit => {
                angle < 50.0
                    || (angle > 150.0 && angle < 190.0)
                    || (angle > 200.0 && angle < 240.0)
            }
            Self::AnalogousSlice => angle < 90.0,
        }
    }

    /// Whether `hue` lies inside this mask when anchored at `base_hue`.
    #[must_use]
    pub fn contains(self, base_hue: f32, hue: f32) -> bool {
        self.admits_angle(relative_angle(base_hue, hue))
    }

    /// Draw a hue inside this mask by rejection sampling.
    ///
    /// Makes up to [`MASK_ATTEMPTS`] uniform draws; the first admitted hue
    /// wins. If every draw misses, returns `base_hue` unchanged.
    pub fn sample_hue(self, base_hue: f32, rng: &mut impl RandomSource) -> f32 {
        for attempt in 0..MASK_ATTEMPTS {
            let hue = rng.hue();
            if self.contains(base_hue, hue) {
                trace!(mask = self.name(), attempt, hue, "mask hit");
                return hue;
            }
        }
        trace!(mask = self.name(), base_hue, "mask missed every draw, using base hue");
        base_hue
    }
}

impl Default for GamutMask {
    fn default() -> Self {
        Self::CATALOG[0]
    }
}

impl fmt::Display for GamutMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Angle from `base_hue` to `hue`, going up the wheel, in [0, 360).
#[must_use]
pub fn relative_angle(base_hue: f32, hue: f32) -> f32 {
    normalize_hue(hue - base_hue)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
