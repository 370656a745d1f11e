//! Text-level screen model
//!
//! A [`Panel`] that keeps the text it was asked to draw instead of pixels.
//! It is double-buffered like the real panel: drawing goes to a pending
//! frame, and [`Panel::present`] makes it the visible one. Useful for
//! host-side inspection of what the scheduler puts on screen, and for
//! logging the visible frame over defmt.

use heapless::{String, Vec};

use marquee_core::{Panel, ScrollDirection};

use crate::backend::DisplayError;
use crate::framebuffer::WIDTH;
use crate::text::chars_per_line;

/// Maximum text spans per frame
pub const SCREEN_SPANS: usize = 8;

/// Maximum characters kept per span (one size-1 line)
pub const LINE_LEN: usize = WIDTH / 6;

/// One piece of drawn text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// Top pixel row
    pub row_start: u8,
    /// Font scale
    pub font_size: u8,
    /// Drawn characters
    pub text: String<LINE_LEN>,
}

impl TextSpan {
    /// Number of cell lines this span covers after wrapping
    pub fn line_count(&self) -> usize {
        let per_line = chars_per_line(self.font_size, WIDTH as u32) as usize;
        self.text.chars().count().div_ceil(per_line).max(1)
    }
}

/// Screen buffer for text-mode inspection
#[derive(Clone, Default)]
pub struct Screen {
    /// Frame being drawn
    pending: Vec<TextSpan, SCREEN_SPANS>,
    /// Frame last presented
    visible: Vec<TextSpan, SCREEN_SPANS>,
    scroll: Option<ScrollDirection>,
    /// Whether a new frame was presented since the last `mark_clean`
    dirty: bool,
    presents: u32,
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans of the visible frame, in draw order
    pub fn spans(&self) -> &[TextSpan] {
        &self.visible
    }

    /// Text drawn at a pixel row in the visible frame
    pub fn get_line(&self, row_start: u8) -> Option<&str> {
        self.visible
            .iter()
            .find(|span| span.row_start == row_start)
            .map(|span| span.text.as_str())
    }

    /// All visible text as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|span| span.text.as_str())
    }

    /// Check if the visible frame has no text
    pub fn is_blank(&self) -> bool {
        self.visible.is_empty()
    }

    /// Active scroll animation
    pub fn scroll(&self) -> Option<ScrollDirection> {
        self.scroll
    }

    /// Number of frames presented so far
    pub fn presents(&self) -> u32 {
        self.presents
    }

    /// Check if screen changed since last inspection
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after inspection)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Panel for Screen {
    type Error = DisplayError;

    fn render_text(
        &mut self,
        row_start: u8,
        char_count: u8,
        font_size: u8,
        text: &str,
    ) -> Result<(), DisplayError> {
        let mut span = TextSpan {
            row_start,
            font_size,
            text: String::new(),
        };
        for ch in text.chars().take(usize::from(char_count)) {
            if span.text.push(ch).is_err() {
                break;
            }
        }
        self.pending
            .push(span)
            .map_err(|_| DisplayError::BufferOverflow)
    }

    fn clear_panel(&mut self) -> Result<(), DisplayError> {
        self.pending.clear();
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.visible = self.pending.clone();
        self.dirty = true;
        self.presents += 1;
        Ok(())
    }

    fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), DisplayError> {
        self.scroll = Some(direction);
        Ok(())
    }

    fn stop_scroll(&mut self) -> Result<(), DisplayError> {
        self.scroll = None;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, span) in self.visible.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}@{}: {}", span.font_size, span.row_start, span.text.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{ClockReading, DisplayScheduler, PayloadSource, TickStatus};

    const NOW: ClockReading = ClockReading::new(8, 30, 0);

    #[test]
    fn test_double_buffering() {
        let mut screen = Screen::new();
        screen.render_text(0, 5, 2, "Hello").unwrap();
        assert!(screen.is_blank());

        screen.present().unwrap();
        assert_eq!(screen.get_line(0), Some("Hello"));
        assert!(screen.is_dirty());

        screen.clear_panel().unwrap();
        assert_eq!(screen.get_line(0), Some("Hello"));
        screen.present().unwrap();
        assert!(screen.is_blank());
        assert_eq!(screen.presents(), 2);
    }

    #[test]
    fn test_char_count_truncates() {
        let mut screen = Screen::new();
        screen.render_text(16, 3, 2, "abcdef").unwrap();
        screen.present().unwrap();
        assert_eq!(screen.get_line(16), Some("abc"));
    }

    #[test]
    fn test_span_overflow() {
        let mut screen = Screen::new();
        for _ in 0..SCREEN_SPANS {
            screen.render_text(0, 1, 1, "x").unwrap();
        }
        assert_eq!(
            screen.render_text(0, 1, 1, "x"),
            Err(DisplayError::BufferOverflow)
        );
    }

    #[test]
    fn test_wrapped_span_line_count() {
        let mut screen = Screen::new();
        screen.render_text(16, 12, 2, "192.168.7.11").unwrap();
        screen.present().unwrap();
        assert_eq!(screen.spans()[0].line_count(), 2);
    }

    #[test]
    fn test_scheduler_on_screen() {
        let mut sched: DisplayScheduler<Screen> = DisplayScheduler::new(Screen::new(), true);
        sched
            .enqueue_display(
                1,
                3,
                false,
                [
                    PayloadSource::Literal(""),
                    PayloadSource::Literal("10.0.0.42"),
                    PayloadSource::Absent,
                ],
            )
            .unwrap();

        assert_eq!(sched.advance_display(NOW), TickStatus::Shown);
        let screen = sched.panel();
        assert_eq!(screen.get_line(0), Some("Device IP:"));
        assert_eq!(screen.get_line(16), Some("10.0.0.42"));
        assert_eq!(screen.get_line(48), Some("T 08:30:00"));
        assert_eq!(screen.scroll(), None);

        assert_eq!(sched.advance_display(NOW), TickStatus::ShownAndScrolled);
        assert_eq!(sched.panel().scroll(), Some(ScrollDirection::Left));

        assert_eq!(sched.advance_display(NOW), TickStatus::ShownAndScrolled);
        assert_eq!(sched.panel().scroll(), Some(ScrollDirection::Right));

        assert_eq!(sched.advance_display(NOW), TickStatus::Cleared);
        assert!(sched.panel().is_blank());
    }
}
