//! Style to layout dispatch
//!
//! Panel layout (128x64, rows in pixels):
//! ```text
//! +---------------------------------------+
//! | row 0: short text, size 2             |  y = 0
//! | row 1: wide text, size 3              |  y = 16
//! |   or narrow text, size 2, two lines   |
//! | row 2: free text or live clock        |  y = 48
//! +---------------------------------------+
//! ```
//!
//! A style code selects which rows are drawn, which font size the middle
//! row uses, and whether the last row shows the clock.

use crate::config::{LayoutConfig, RowGeometry};
use crate::messages::DEVICE_IP_LABEL;
use crate::record::DisplayRecord;
use crate::traits::{ClockReading, Panel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Style {
    /// Top text, wide middle text, clock
    Default = 0,
    /// "Device IP:" label, narrow two-line address, clock
    DeviceIp = 1,
    /// Top text, narrow middle text, clock
    LongPayload = 2,
    /// Draw nothing and clear the panel
    Clear = 3,
    /// Top, wide middle, free bottom line
    FullWide = 4,
    /// Top, narrow middle, free bottom line
    FullNarrow = 5,
    /// Same drawing as [`Style::FullWide`]
    FullWideNoScroll = 6,
    /// Same drawing as [`Style::FullNarrow`]
    FullNarrowNoScroll = 7,
}

impl Style {
    /// Decode a style code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Style::Default),
            1 => Some(Style::DeviceIp),
            2 => Some(Style::LongPayload),
            3 => Some(Style::Clear),
            4 => Some(Style::FullWide),
            5 => Some(Style::FullNarrow),
            6 => Some(Style::FullWideNoScroll),
            7 => Some(Style::FullNarrowNoScroll),
            _ => None,
        }
    }

    /// Numeric style code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Styles whose last row is always the live clock
    pub const fn reserves_clock_row(self) -> bool {
        matches!(self, Style::Default | Style::DeviceIp | Style::LongPayload)
    }

    /// Rendering shape for this style, `None` for [`Style::Clear`]
    pub const fn shape(self) -> Option<Shape> {
        match self {
            Style::Default => Some(Shape {
                top: RowText::Line(0),
                middle: MiddleRow::Wide,
                bottom: BottomRow::Clock,
            }),
            Style::DeviceIp => Some(Shape {
                top: RowText::Label(DEVICE_IP_LABEL),
                middle: MiddleRow::Narrow,
                bottom: BottomRow::Clock,
            }),
            Style::LongPayload => Some(Shape {
                top: RowText::Line(0),
                middle: MiddleRow::Narrow,
                bottom: BottomRow::Clock,
            }),
            Style::Clear => None,
            Style::FullWide | Style::FullWideNoScroll => Some(Shape {
                top: RowText::Line(0),
                middle: MiddleRow::Wide,
                bottom: BottomRow::Text,
            }),
            Style::FullNarrow | Style::FullNarrowNoScroll => Some(Shape {
                top: RowText::Line(0),
                middle: MiddleRow::Narrow,
                bottom: BottomRow::Text,
            }),
        }
    }
}

/// Where the top row text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowText {
    /// Payload line of the record
    Line(usize),
    /// Fixed label
    Label(&'static str),
}

/// Middle row font variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MiddleRow {
    /// Large font, single line
    Wide,
    /// Small font, wraps onto two lines
    Narrow,
}

/// Bottom row content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BottomRow {
    /// Live clock readout
    Clock,
    /// Third payload line
    Text,
}

/// Concrete rendering shape of a style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Shape {
    pub top: RowText,
    pub middle: MiddleRow,
    pub bottom: BottomRow,
}

/// Logical panel row, used for single-row drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Top row
    Top,
    /// Middle row, large font
    Wide,
    /// Bottom row
    Bottom,
    /// Middle row, small font
    Narrow,
}

impl Row {
    /// Geometry of this row under a layout
    pub const fn geometry(self, layout: &LayoutConfig) -> RowGeometry {
        match self {
            Row::Top => layout.top,
            Row::Wide => layout.wide,
            Row::Bottom => layout.bottom,
            Row::Narrow => layout.narrow,
        }
    }
}

/// Draw one line of text at a row, skipping empty text
pub fn draw_row<P: Panel>(panel: &mut P, row: RowGeometry, text: &str) -> Result<(), P::Error> {
    if text.is_empty() {
        return Ok(());
    }
    let char_count = u8::try_from(text.chars().count()).unwrap_or(u8::MAX);
    panel.render_text(row.start, char_count, row.size, text)
}

/// Render a record according to its style
///
/// Clears the panel, draws the rows the style uses, and presents. Unknown
/// styles and [`Style::Clear`] draw nothing. Scroll state is never touched.
pub fn render_record<P: Panel>(
    panel: &mut P,
    layout: &LayoutConfig,
    record: &DisplayRecord,
    now: ClockReading,
) -> Result<(), P::Error> {
    let Some(style) = record.style_kind() else {
        #[cfg(feature = "defmt")]
        defmt::warn!("unknown display style {}, nothing drawn", record.style);
        return Ok(());
    };
    let Some(shape) = style.shape() else {
        return Ok(());
    };

    panel.clear_panel()?;

    let top = match shape.top {
        RowText::Line(index) => record.line(index),
        RowText::Label(label) => label,
    };
    draw_row(panel, layout.top, top)?;

    let middle = match shape.middle {
        MiddleRow::Wide => layout.wide,
        MiddleRow::Narrow => layout.narrow,
    };
    draw_row(panel, middle, record.line(1))?;

    match shape.bottom {
        BottomRow::Clock => panel.render_clock(layout.bottom, now)?,
        BottomRow::Text => draw_row(panel, layout.bottom, record.line(2))?,
    }

    panel.present()
}
