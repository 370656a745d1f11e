//! Board-agnostic core logic for the Marquee display scheduler
//!
//! This crate contains everything that does not depend on a specific
//! panel or clock implementation:
//!
//! - Display records and payload sources
//! - Bounded FIFO display queue
//! - Scroll lifecycle state machine
//! - Style to layout dispatch
//! - The scheduler that ties queue, scroll and layouts together
//! - Collaborator traits (panel, clock)
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod layout;
pub mod messages;
pub mod queue;
pub mod record;
pub mod scheduler;
pub mod scroll;
pub mod traits;

#[cfg(test)]
mod testing;

pub use error::QueueError;
pub use layout::Style;
pub use queue::{DisplayQueue, QUEUE_CAPACITY};
pub use record::{DisplayRecord, Payload, PayloadSource, CLOCK_MARKER, ERROR_MARKER};
pub use scheduler::{DisplayScheduler, TickStatus};
pub use scroll::{ScrollAction, ScrollDirection, ScrollPhase, Transition};
pub use traits::{ClockReading, ClockSource, Panel};

/// Library version reported at start-up
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
