// SPDX-License-Identifier: MIT
//
// cflash-color — color math for the cflash palette engine.
//
// Palettes are drawn in HSV, shipped as `#rrggbb` strings, and spaced apart
// in CIE L*a*b*. This crate owns those three representations and the
// conversions between them, plus the WCAG contrast helpers the front end
// uses to label each card.

pub mod color;
pub mod contrast;

pub use color::{Color, Hsv, Lab, ParseColorError};
