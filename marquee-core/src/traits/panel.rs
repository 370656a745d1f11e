//! Panel rendering collaborator
//!
//! The scheduler never touches pixels. It calls into a [`Panel`] that owns
//! the frame buffer and the bus to the physical display.

use crate::config::RowGeometry;
use crate::scroll::ScrollDirection;
use crate::traits::clock::ClockReading;

/// Trait for a character-oriented OLED panel
///
/// Drawing calls go to an off-screen buffer; nothing is visible until
/// [`Panel::present`]. Scroll calls act on the hardware immediately.
pub trait Panel {
    /// Error type for panel operations
    type Error: core::fmt::Debug;

    /// Draw text starting at a pixel row
    ///
    /// - `row_start`: top pixel row of the text
    /// - `char_count`: number of characters of `text` to draw
    /// - `font_size`: integer font scale (1 = 6x8 cell)
    fn render_text(
        &mut self,
        row_start: u8,
        char_count: u8,
        font_size: u8,
        text: &str,
    ) -> Result<(), Self::Error>;

    /// Draw the clock readout on a row
    fn render_clock(&mut self, row: RowGeometry, now: ClockReading) -> Result<(), Self::Error> {
        let text = now.format();
        self.render_text(row.start, text.len() as u8, row.size, &text)
    }

    /// Clear the off-screen buffer
    fn clear_panel(&mut self) -> Result<(), Self::Error>;

    /// Flush the off-screen buffer to the display
    fn present(&mut self) -> Result<(), Self::Error>;

    /// Start continuous horizontal scrolling
    fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), Self::Error>;

    /// Stop any scroll animation
    fn stop_scroll(&mut self) -> Result<(), Self::Error>;
}

impl<P: Panel + ?Sized> Panel for &mut P {
    type Error = P::Error;

    fn render_text(
        &mut self,
        row_start: u8,
        char_count: u8,
        font_size: u8,
        text: &str,
    ) -> Result<(), Self::Error> {
        (**self).render_text(row_start, char_count, font_size, text)
    }

    fn render_clock(&mut self, row: RowGeometry, now: ClockReading) -> Result<(), Self::Error> {
        (**self).render_clock(row, now)
    }

    fn clear_panel(&mut self) -> Result<(), Self::Error> {
        (**self).clear_panel()
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        (**self).present()
    }

    fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), Self::Error> {
        (**self).start_scroll(direction)
    }

    fn stop_scroll(&mut self) -> Result<(), Self::Error> {
        (**self).stop_scroll()
    }
}
