//! Scroll lifecycle state machine
//!
//! Each record walks through a fixed sequence, one phase per tick:
//!
//! ```text
//! Still (3) -> ScrollLeft (2) -> ScrollRight (1) -> Clearing (0)
//! Frozen (4) stays on screen with no animation
//! ```
//!
//! The transition function is pure. The scheduler applies the returned
//! action to the panel and decides whether the successor phase is queued.

use crate::scheduler::TickStatus;

/// Horizontal scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Scroll phase of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScrollPhase {
    /// Clear the panel, sequence done
    Clearing = 0,
    /// Animate scrolling right
    ScrollRight = 1,
    /// Animate scrolling left
    ScrollLeft = 2,
    /// Still display before scrolling
    Still = 3,
    /// Still display, no animation follows
    Frozen = 4,
}

/// Panel action for one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollAction {
    /// Stop any running animation
    Freeze,
    /// Stop any running animation, left scroll follows
    FreezeThenArm,
    /// Start the given horizontal scroll
    Scroll(ScrollDirection),
    /// Clear the panel and present
    Clear,
}

/// Result of running one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// What the panel should do now
    pub action: ScrollAction,
    /// Phase of the successor record, `None` when the sequence ends
    pub next: Option<ScrollPhase>,
    /// Status reported by the tick
    pub status: TickStatus,
}

impl ScrollPhase {
    /// Decode a scroll code, `None` for out-of-range codes
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ScrollPhase::Clearing),
            1 => Some(ScrollPhase::ScrollRight),
            2 => Some(ScrollPhase::ScrollLeft),
            3 => Some(ScrollPhase::Still),
            4 => Some(ScrollPhase::Frozen),
            _ => None,
        }
    }

    /// Numeric scroll code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Run this phase
    pub const fn transition(self) -> Transition {
        match self {
            ScrollPhase::Frozen => Transition {
                action: ScrollAction::Freeze,
                next: None,
                status: TickStatus::Shown,
            },
            ScrollPhase::Still => Transition {
                action: ScrollAction::FreezeThenArm,
                next: Some(ScrollPhase::ScrollLeft),
                status: TickStatus::Shown,
            },
            ScrollPhase::ScrollLeft => Transition {
                action: ScrollAction::Scroll(ScrollDirection::Left),
                next: Some(ScrollPhase::ScrollRight),
                status: TickStatus::ShownAndScrolled,
            },
            ScrollPhase::ScrollRight => Transition {
                action: ScrollAction::Scroll(ScrollDirection::Right),
                next: Some(ScrollPhase::Clearing),
                status: TickStatus::ShownAndScrolled,
            },
            ScrollPhase::Clearing => Transition {
                action: ScrollAction::Clear,
                next: None,
                status: TickStatus::Cleared,
            },
        }
    }

    /// Run the phase for a raw scroll code
    ///
    /// Unknown codes freeze the display and end the sequence.
    pub fn transition_code(code: u8) -> Transition {
        match Self::from_code(code) {
            Some(phase) => phase.transition(),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("unknown scroll code {}, freezing", code);
                ScrollPhase::Frozen.transition()
            }
        }
    }
}
