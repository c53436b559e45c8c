//! Errors for palette requests.

use thiserror::Error;

/// Errors raised while interpreting a palette request.
///
/// Generation itself never fails; these cover input that arrives as text or
/// from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The scheme name is not one of the known schemes.
    #[error("unknown color scheme: {0:?} (expected one of complementary, monochromatic, analogous, triadic, gamutMask)")]
    UnknownScheme(String),

    /// The requested number of colors is outside the supported range.
    #[error("invalid color count {count}: must be between 1 and {max}")]
    InvalidCount { count: usize, max: usize },
}
