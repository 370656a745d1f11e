//! Minimal TOML parser for display configuration
//!
//! Handles only the subset needed for `display.toml`. Arrays, tables of
//! tables and multi-line strings are NOT supported.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers: `display`, `layout`, `startup`
//! - Comments (# ...)
//!
//! Row geometry is written as `"start:size"`, e.g. `wide = "16:3"`.
//! Unknown keys are ignored so newer files load on older firmware.

use crate::layout::Style;
use crate::record::{Payload, PAYLOAD_MAX_LEN};
use crate::scroll::ScrollPhase;

use super::types::{RowGeometry, SchedulerConfig, SelfTestPattern};

/// Panel height in pixels, upper bound for row starts
const PANEL_HEIGHT: u8 = 64;

/// Largest font scale accepted
const MAX_FONT_SIZE: u8 = 8;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Value outside the accepted range
    OutOfRange,
    /// Text does not fit a payload line
    TextTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Layout,
    Startup,
}

/// Parse TOML configuration into a [`SchedulerConfig`]
///
/// Keys not present keep their defaults.
pub fn parse_config(input: &str) -> Result<SchedulerConfig, ParseError> {
    let mut config = SchedulerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "layout" => Ok(Section::Layout),
        "startup" => Ok(Section::Startup),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match comment_start(value) {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Byte offset of the first `#` outside a quoted string
fn comment_start(value: &str) -> Option<usize> {
    let mut in_string = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_self_test(value: &str) -> Result<SelfTestPattern, ParseError> {
    match parse_string(value) {
        "none" => Ok(SelfTestPattern::None),
        "lines" => Ok(SelfTestPattern::Lines),
        "rectangles" => Ok(SelfTestPattern::Rectangles),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse row geometry like "16:3"
fn parse_row(value: &str) -> Result<RowGeometry, ParseError> {
    let (start, size) = parse_string(value)
        .split_once(':')
        .ok_or(ParseError::InvalidValue)?;
    let start: u8 = parse_int(start.trim())?;
    let size: u8 = parse_int(size.trim())?;

    if start >= PANEL_HEIGHT || size == 0 || size > MAX_FONT_SIZE {
        return Err(ParseError::OutOfRange);
    }

    Ok(RowGeometry::new(start, size))
}

fn parse_line(value: &str) -> Result<Payload, ParseError> {
    let text = parse_string(value);
    if text.len() > PAYLOAD_MAX_LEN {
        return Err(ParseError::TextTooLong);
    }
    Ok(Payload::from_text(text))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut SchedulerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Display => match key {
            "enabled" => config.enabled = parse_bool(value)?,
            "self_test" => config.self_test = parse_self_test(value)?,
            "post_test_delay_ms" => config.post_test_delay_ms = parse_int(value)?,
            "tick_ms" => {
                let tick: u32 = parse_int(value)?;
                if tick == 0 {
                    return Err(ParseError::OutOfRange);
                }
                config.tick_ms = tick;
            }
            _ => {}
        },
        Section::Layout => match key {
            "top" => config.layout.top = parse_row(value)?,
            "wide" => config.layout.wide = parse_row(value)?,
            "bottom" => config.layout.bottom = parse_row(value)?,
            "narrow" => config.layout.narrow = parse_row(value)?,
            _ => {}
        },
        Section::Startup => match key {
            "style" => {
                let style: u8 = parse_int(value)?;
                if Style::from_code(style).is_none() {
                    return Err(ParseError::OutOfRange);
                }
                config.startup.style = style;
            }
            "scroll" => {
                let scroll: u8 = parse_int(value)?;
                if ScrollPhase::from_code(scroll).is_none() {
                    return Err(ParseError::OutOfRange);
                }
                config.startup.scroll = scroll;
            }
            "line0" => config.startup.lines[0] = parse_line(value)?,
            "line1" => config.startup.lines[1] = parse_line(value)?,
            "line2" => config.startup.lines[2] = parse_line(value)?,
            _ => {}
        },
    }

    Ok(())
}
