//! Recording panel for unit tests

use heapless::{String, Vec};

use crate::scroll::ScrollDirection;
use crate::traits::Panel;

/// One recorded panel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// row start, char count, font size, text
    Text(u8, u8, u8, String<32>),
    Clear,
    Present,
    StartScroll(ScrollDirection),
    StopScroll,
}

impl Call {
    pub fn text(start: u8, count: u8, size: u8, text: &str) -> Self {
        let mut s = String::new();
        let _ = s.push_str(text);
        Call::Text(start, count, size, s)
    }
}

/// Panel that records every call in order
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub calls: Vec<Call, 64>,
    /// Fail every operation after recording it
    pub fail: bool,
}

impl RecordingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawn text as (row start, font size, text), in call order
    pub fn texts(&self) -> Vec<(u8, u8, &str), 16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(start, _, size, text) => Some((*start, *size, text.as_str())),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: Call) -> Result<(), ()> {
        let _ = self.calls.push(call);
        if self.fail {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl Panel for RecordingPanel {
    type Error = ();

    fn render_text(
        &mut self,
        row_start: u8,
        char_count: u8,
        font_size: u8,
        text: &str,
    ) -> Result<(), ()> {
        self.record(Call::text(row_start, char_count, font_size, text))
    }

    fn clear_panel(&mut self) -> Result<(), ()> {
        self.record(Call::Clear)
    }

    fn present(&mut self) -> Result<(), ()> {
        self.record(Call::Present)
    }

    fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), ()> {
        self.record(Call::StartScroll(direction))
    }

    fn stop_scroll(&mut self) -> Result<(), ()> {
        self.record(Call::StopScroll)
    }
}
