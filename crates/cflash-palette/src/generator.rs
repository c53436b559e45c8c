//! Palette generation — from one random base hue to a spaced-out color set.
//!
//! A palette is built in three passes:
//!
//! 1. **Scheme pass.** Up to [`SCHEME_ATTEMPTS`] candidates from the chosen
//!    [`Scheme`]; each is kept if it is not [too similar](crate::distance)
//!    to the colors already kept.
//! 2. **Fallback pass.** If the scheme could not fill the palette, up to
//!    [`FALLBACK_ATTEMPTS`] fully random colors (uniform hue, saturation and
//!    brightness), still distance-filtered. The palette keeps its size but
//!    loses its harmony for these slots.
//! 3. **Top-up.** Whatever is still missing is filled with unchecked random
//!    colors, so the palette always has exactly the requested length.
//!
//! Passes 2 and 3 are reported through [`Palette::warning`] rather than
//! happening silently.

use std::fmt;

use cflash_color::{Color, Hsv};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::distance::is_too_similar;
use crate::error::PaletteError;
use crate::mask::GamutMask;
use crate::random::{RandomSource, ThreadRandom};
use crate::scheme::Scheme;

/// Scheme candidates tried before falling back to random colors.
pub const SCHEME_ATTEMPTS: usize = 100;

/// Random candidates tried before giving up on distinctness.
pub const FALLBACK_ATTEMPTS: usize = 1000;

/// Largest palette [`PaletteRequest::validate`] accepts.
pub const MAX_COUNT: usize = 12;

// ---------------------------------------------------------------------------
// PaletteRequest
// ---------------------------------------------------------------------------

/// What the caller wants: how many colors, which scheme, which mask.
///
/// `mask_index` is only consulted by [`Scheme::GamutMask`] and wraps modulo
/// the mask catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteRequest {
    pub count: usize,
    pub scheme: Scheme,
    pub mask_index: i64,
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self {
            count: 3,
            scheme: Scheme::default(),
            mask_index: 0,
        }
    }
}

impl PaletteRequest {
    #[must_use]
    pub const fn new(count: usize, scheme: Scheme) -> Self {
        Self { count, scheme, mask_index: 0 }
    }

    #[must_use]
    pub const fn with_mask(self, mask_index: i64) -> Self {
        Self { mask_index, ..self }
    }

    /// The gamut mask selected by `mask_index`.
    #[must_use]
    pub fn mask(&self) -> GamutMask {
        GamutMask::from_index(self.mask_index)
    }

    /// Check that `count` is between 1 and [`MAX_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCount`] otherwise.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.count == 0 || self.count > MAX_COUNT {
            return Err(PaletteError::InvalidCount { count: self.count, max: MAX_COUNT });
        }
        Ok(())
    }

    /// Generate with the thread-local RNG.
    #[must_use]
    pub fn generate(&self) -> Palette {
        generate_palette(self, &mut ThreadRandom::new())
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Which pass produced a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Follows the requested scheme and passed the distance filter.
    Scheme,
    /// Fully random, but passed the distance filter.
    Random,
    /// Fully random and not checked for distinctness.
    Unchecked,
}

/// One generated color together with the HSV it was made from.
///
/// `hsv` is the clamped value actually converted to `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub hsv: Hsv,
    pub color: Color,
    pub origin: Origin,
}

/// A quality note attached to a palette that needed fallback colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteWarning {
    /// `count` colors are random instead of following the scheme.
    Relaxed { count: usize },
    /// `count` colors may sit too close to another color in the palette.
    Indistinct { count: usize },
}

impl fmt::Display for PaletteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relaxed { count } => write!(
                f,
                "{count} of the requested colors could not follow the scheme and were picked at random"
            ),
            Self::Indistinct { count } => write!(
                f,
                "could not guarantee distinctness for {count} of the requested colors"
            ),
        }
    }
}

/// An ordered set of colors generated from one base hue.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// The hue every scheme offset is measured from. `0.0` for an empty
    /// palette, which draws no randomness at all.
    pub base_hue: f32,
    pub scheme: Scheme,
    pub mask: GamutMask,
    pub swatches: Vec<Swatch>,
}

impl Palette {
    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swatch> {
        self.swatches.iter()
    }

    /// The colors, in generation order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.swatches.iter().map(|s| s.color)
    }

    /// The colors as `#rrggbb` strings, in generation order.
    #[must_use]
    pub fn hexes(&self) -> Vec<String> {
        self.colors().map(Color::to_hex).collect()
    }

    /// Number of swatches that came from the random fallback pass.
    #[must_use]
    pub fn relaxed(&self) -> usize {
        self.count_origin(Origin::Random)
    }

    /// Number of swatches that could not be checked for distinctness.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.count_origin(Origin::Unchecked)
    }

    /// The most serious quality note for this palette, if any.
    #[must_use]
    pub fn warning(&self) -> Option<PaletteWarning> {
        let shortfall = self.shortfall();
        if shortfall > 0 {
            return Some(PaletteWarning::Indistinct { count: shortfall });
        }
        let relaxed = self.relaxed();
        (relaxed > 0).then_some(PaletteWarning::Relaxed { count: relaxed })
    }

    fn count_origin(&self, origin: Origin) -> usize {
        self.swatches.iter().filter(|s| s.origin == origin).count()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Accumulates accepted swatches and their colors for distance checks.
struct Builder {
    swatches: Vec<Swatch>,
    colors: Vec<Color>,
}

impl Builder {
    fn with_capacity(count: usize) -> Self {
        Self {
            swatches: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    fn len(&self) -> usize {
        self.colors.len()
    }

    /// Keep the candidate unless it is too close to a kept color.
    fn offer(&mut self, hsv: Hsv, origin: Origin) {
        let hsv = hsv.clamped();
        let color = Color::from_hsv(hsv);
        if origin != Origin::Unchecked && is_too_similar(color, &self.colors) {
            trace!(%color, ?origin, "rejected: too close to an accepted color");
            return;
        }
        self.swatches.push(Swatch { hsv, color, origin });
        self.colors.push(color);
    }
}

/// A color with uniform hue, saturation and brightness.
fn random_hsv(rng: &mut impl RandomSource) -> Hsv {
    let h = rng.hue();
    let s = rng.range(0.0, 1.0);
    let v = rng.range(0.0, 1.0);
    Hsv::new(h, s, v)
}

/// Generate a palette for `request`, drawing all randomness from `rng`.
///
/// The result always holds exactly `request.count` colors. Identical
/// requests with identical random sequences produce identical palettes.
pub fn generate_palette(request: &PaletteRequest, rng: &mut impl RandomSource) -> Palette {
    let count = request.count;
    let scheme = request.scheme;
    let mask = request.mask();

    if count == 0 {
        return Palette { base_hue: 0.0, scheme, mask, swatches: Vec::new() };
    }

    let base_hue = rng.hue();
    let mut builder = Builder::with_capacity(count);

    let mut attempts = 0;
    while builder.len() < count && attempts < SCHEME_ATTEMPTS {
        let hsv = scheme.color_at(base_hue, builder.len(), mask, rng);
        builder.offer(hsv, Origin::Scheme);
        attempts += 1;
    }

    let from_scheme = builder.len();
    if from_scheme < count {
        let mut fallback_attempts = 0;
        while builder.len() < count && fallback_attempts < FALLBACK_ATTEMPTS {
            builder.offer(random_hsv(rng), Origin::Random);
            fallback_attempts += 1;
        }
        while builder.len() < count {
            builder.offer(random_hsv(rng), Origin::Unchecked);
        }
    }

    let palette = Palette { base_hue, scheme, mask, swatches: builder.swatches };

    debug!(
        %scheme,
        base_hue,
        count,
        attempts,
        from_scheme,
        "generated palette"
    );
    if let Some(warning) = palette.warning() {
        warn!(%scheme, base_hue, "{warning}");
    }

    palette
}

/// Shorthand for [`generate_palette`] without building a request first.
pub fn generate_palette_with(
    count: usize,
    scheme: Scheme,
    mask_index: i64,
    rng: &mut impl RandomSource,
) -> Palette {
    generate_palette(&PaletteRequest::new(count, scheme).with_mask(mask_index), rng)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
