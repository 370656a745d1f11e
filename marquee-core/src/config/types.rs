//! Configuration type definitions

use crate::messages::{HELLO, PROG_START, WAIT_FOR_IP};
use crate::record::{Payload, RECORD_LINES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick period in milliseconds
pub const DEFAULT_TICK_MS: u32 = 1000;

/// Default pause after a self-test pattern in milliseconds
pub const DEFAULT_POST_TEST_DELAY_MS: u32 = 1000;

/// Pixel placement of one text row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowGeometry {
    /// Top pixel row
    pub start: u8,
    /// Integer font scale (1 = 6x8 cell)
    pub size: u8,
}

impl RowGeometry {
    /// Create a row geometry
    pub const fn new(start: u8, size: u8) -> Self {
        Self { start, size }
    }
}

/// Row placement for all layouts
///
/// The narrow row overlaps the wide one: both are the middle row, drawn
/// with a smaller font so longer text wraps onto two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Row 0
    pub top: RowGeometry,
    /// Row 1, large font
    pub wide: RowGeometry,
    /// Row 2 (free text or clock)
    pub bottom: RowGeometry,
    /// Row 1, small font
    pub narrow: RowGeometry,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top: RowGeometry::new(0, 2),
            wide: RowGeometry::new(16, 3),
            bottom: RowGeometry::new(48, 2),
            narrow: RowGeometry::new(16, 2),
        }
    }
}

/// Power-on test pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelfTestPattern {
    /// Skip the test
    #[default]
    None,
    /// Fans of lines from each corner
    Lines,
    /// Concentric rectangles
    Rectangles,
}

/// Record pushed by the scheduler at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StartupMessage {
    /// Style code
    pub style: u8,
    /// Scroll code
    pub scroll: u8,
    /// Line texts
    pub lines: [Payload; RECORD_LINES],
}

impl Default for StartupMessage {
    fn default() -> Self {
        Self {
            style: 6,
            scroll: 4,
            lines: [
                Payload::from_text(PROG_START),
                Payload::from_text(HELLO),
                Payload::from_text(WAIT_FOR_IP),
            ],
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerConfig {
    /// Scheduler active (false simulates an absent panel)
    pub enabled: bool,
    /// Pattern drawn once at power-on
    pub self_test: SelfTestPattern,
    /// Pause after the self-test pattern (ms)
    pub post_test_delay_ms: u32,
    /// Animation frame period (ms)
    pub tick_ms: u32,
    /// Row placement
    pub layout: LayoutConfig,
    /// First record shown
    pub startup: StartupMessage,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            self_test: SelfTestPattern::None,
            post_test_delay_ms: DEFAULT_POST_TEST_DELAY_MS,
            tick_ms: DEFAULT_TICK_MS,
            layout: LayoutConfig::default(),
            startup: StartupMessage::default(),
        }
    }
}
