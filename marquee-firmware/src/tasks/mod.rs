//! Embassy async tasks
//!
//! Each task runs independently and shares the scheduler through a mutex.

pub mod producer;
pub mod tick;

pub use producer::producer_task;
pub use tick::display_tick_task;
