//! Panel implementations for the Marquee display scheduler
//!
//! This crate provides:
//! - `Ssd1306` I2C driver implementing [`marquee_core::Panel`]
//! - `FrameBuffer` page buffer usable as an embedded-graphics draw target
//! - Scaled text layout on 6x8 character cells
//! - Power-on self-test patterns (line fans, nested rectangles)
//! - `Screen`, a text-level panel for host-side inspection
//!
//! # Architecture
//!
//! The scheduler in `marquee-core` only speaks the `Panel` trait. The
//! firmware wraps the board's blocking I2C bus in an `Ssd1306` and hands it
//! to the scheduler; host tests hand it a `Screen` instead.

#![no_std]

pub mod backend;
pub mod framebuffer;
pub mod screen;
pub mod self_test;
pub mod ssd1306;
pub mod text;

#[cfg(test)]
mod testing;

// Re-export key types
pub use backend::{DisplayError, GraphicsPanel};
pub use framebuffer::{FrameBuffer, HEIGHT, WIDTH};
pub use screen::{Screen, TextSpan};
pub use ssd1306::{Ssd1306, SSD1306_ADDR};
