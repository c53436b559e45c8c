// SPDX-License-Identifier: MIT
//
// Flash-card rendering — palettes drawn straight to the terminal.
//
// Each color becomes a solid block of 24-bit background cells with its hex
// code printed near the bottom, in black or white depending on which reads
// better. Plain mode skips escapes entirely and prints one code per line.
//
// All functions write to any `impl Write` and propagate its errors.

use std::io::{self, Write};

use cflash_color::Color;
use cflash_color::contrast::label_color;
use cflash_palette::Palette;
use unicode_width::UnicodeWidthStr;

/// Columns per card.
pub const CARD_WIDTH: usize = 14;

/// Rows per card.
pub const CARD_HEIGHT: usize = 6;

/// Blank columns between cards.
const GUTTER: usize = 2;

/// How palettes are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Colored cards with labels.
    Cards,
    /// One `#rrggbb` per line, no escapes.
    Plain,
}

// ─── Escapes ─────────────────────────────────────────────────────────────────

/// Set a 24-bit foreground color.
#[inline]
pub fn fg(w: &mut impl Write, c: Color) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

/// Set a 24-bit background color.
#[inline]
pub fn bg(w: &mut impl Write, c: Color) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b)
}

/// Reset all SGR attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Clear the screen and home the cursor between rounds.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J\x1b[H")
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Pad `text` with spaces to `width` display columns, centered.
/// Text wider than `width` is returned unchanged.
fn center(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    if used >= width {
        return text.to_owned();
    }
    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Print a palette in the given style.
pub fn palette(w: &mut impl Write, palette: &Palette, style: Style) -> io::Result<()> {
    match style {
        Style::Plain => plain(w, palette),
        Style::Cards => cards(w, palette),
    }
}

fn plain(w: &mut impl Write, palette: &Palette) -> io::Result<()> {
    for hex in palette.hexes() {
        writeln!(w, "{hex}")?;
    }
    Ok(())
}

fn cards(w: &mut impl Write, palette: &Palette) -> io::Result<()> {
    let title = palette.scheme.display_name(palette.mask);
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "─".repeat(UnicodeWidthStr::width(title.as_str())))?;
    writeln!(w)?;

    let label_row = CARD_HEIGHT.saturating_sub(2);
    for row in 0..CARD_HEIGHT {
        for (i, color) in palette.colors().enumerate() {
            if i > 0 {
                w.write_all(" ".repeat(GUTTER).as_bytes())?;
            }
            bg(w, color)?;
            if row == label_row {
                fg(w, label_color(color))?;
                w.write_all(center(&color.to_hex_upper(), CARD_WIDTH).as_bytes())?;
            } else {
                w.write_all(" ".repeat(CARD_WIDTH).as_bytes())?;
            }
            reset(w)?;
        }
        writeln!(w)?;
    }

    if let Some(warning) = palette.warning() {
        writeln!(w)?;
        writeln!(w, "note: {warning}")?;
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
