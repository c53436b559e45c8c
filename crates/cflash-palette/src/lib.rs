//! # cflash-palette — harmonious random palettes
//!
//! Generates small sets of visually distinct colors that follow a color
//! harmony. One call picks a random base hue, derives every color from it,
//! and keeps the colors far enough apart in CIE L*a*b* to tell them apart.
//!
//! # Architecture
//!
//! ```text
//! PaletteRequest { count, scheme, mask_index } + RandomSource
//!     │
//!     ▼
//! generator.rs: draw base hue once, loop over palette slots
//!     │
//!     ├──► scheme.rs:   (base_hue, index) → HSV by harmony rule
//!     │        └──► mask.rs: rejection-sample a hue inside the gamut mask
//!     │
//!     ▼
//! distance.rs:  reject candidates within ΔE 50 of an accepted color
//!     │
//!     ▼
//! Palette { swatches: [#rrggbb …], warning }
//! ```
//!
//! # Determinism
//!
//! All randomness comes from the caller's [`RandomSource`]. The engine keeps
//! no state between calls, so the same request and random sequence always
//! produce the same palette.

// Mathematical code uses small integer-to-float casts (palette indices).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod distance;
pub mod error;
pub mod generator;
pub mod mask;
pub mod random;
pub mod scheme;

pub use error::PaletteError;
pub use generator::{
    Origin, Palette, PaletteRequest, PaletteWarning, Swatch, generate_palette,
    generate_palette_with,
};
pub use mask::GamutMask;
pub use random::{RandomSource, ScriptedRandom, ThreadRandom, Xorshift32};
pub use scheme::Scheme;
