//! Scaled text rendering
//!
//! Text is laid out on a grid of character cells. A font size of `n` gives
//! cells of `6n x 8n` pixels. Text that runs past the right edge wraps to
//! the next cell row, starting again at column 0, so a size-2 row holds
//! ten characters per line. Text below the bottom edge is dropped.
//!
//! Glyphs come from the embedded-graphics mono fonts, picked so each
//! glyph fits inside its cell.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// Base cell width at size 1
pub const CELL_WIDTH: u32 = 6;

/// Base cell height at size 1
pub const CELL_HEIGHT: u32 = 8;

/// Font used for a size
pub fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_5X8,
        2 => &FONT_9X15,
        _ => &FONT_10X20,
    }
}

/// Cell dimensions for a size
pub fn cell_size(size: u8) -> Size {
    let scale = u32::from(size.max(1));
    Size::new(CELL_WIDTH * scale, CELL_HEIGHT * scale)
}

/// Number of whole cells per line at a size
pub fn chars_per_line(size: u8, width: u32) -> u32 {
    (width / cell_size(size).width).max(1)
}

/// Draw up to `char_count` characters of `text` starting at `row_start`
pub fn draw_text<D>(
    target: &mut D,
    row_start: u8,
    char_count: u8,
    size: u8,
    text: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let bounds = target.size();
    let cell = cell_size(size);
    let style = MonoTextStyle::new(font_for_size(size), BinaryColor::On);

    let mut x = 0u32;
    let mut y = u32::from(row_start);

    for ch in text.chars().take(usize::from(char_count)) {
        if x + cell.width > bounds.width {
            x = 0;
            y += cell.height;
        }
        if y >= bounds.height {
            break;
        }

        let mut buf = [0u8; 4];
        let glyph: &str = ch.encode_utf8(&mut buf);
        Text::with_baseline(
            glyph,
            Point::new(x as i32, y as i32),
            style,
            Baseline::Top,
        )
        .draw(target)?;

        x += cell.width;
    }

    Ok(())
}
