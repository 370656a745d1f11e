//! Configuration
//!
//! Board-agnostic configuration structures and a small parser for the
//! `display.toml` format embedded in the firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
