//! Display backend types
//!
//! Shared error type for panel implementations and the extension trait for
//! panels that also accept pixel drawing.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use marquee_core::Panel;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => write!(f, "display bus error"),
            DisplayError::NotInitialized => write!(f, "display not initialized"),
            DisplayError::BufferOverflow => write!(f, "display buffer overflow"),
        }
    }
}

/// Panel that also supports pixel graphics
///
/// Used by the power-on self-test patterns, which draw lines and
/// rectangles directly instead of text rows.
pub trait GraphicsPanel:
    Panel<Error = DisplayError> + DrawTarget<Color = BinaryColor, Error = DisplayError>
{
}

impl<T> GraphicsPanel for T where
    T: Panel<Error = DisplayError> + DrawTarget<Color = BinaryColor, Error = DisplayError>
{
}
