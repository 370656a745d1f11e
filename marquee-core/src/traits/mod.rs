//! Collaborator traits
//!
//! These traits define the interface between the scheduler and the
//! hardware it drives: the panel it renders to and the clock it reads.

pub mod clock;
pub mod panel;

pub use clock::{ClockReading, ClockSource};
pub use panel::Panel;
