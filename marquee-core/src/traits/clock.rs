//! Clock collaborator

use core::fmt::Write;

use heapless::String;

/// Capacity of a formatted clock line ("T hh:mm:ss")
pub const CLOCK_TEXT_LEN: usize = 10;

/// Wall-clock reading rendered on clock rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockReading {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockReading {
    /// Create a reading
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Reading for a number of seconds since midnight (wraps at 24h)
    pub const fn from_seconds(total: u64) -> Self {
        let day = total % 86_400;
        Self {
            hour: (day / 3600) as u8,
            minute: ((day / 60) % 60) as u8,
            second: (day % 60) as u8,
        }
    }

    /// Format as `T hh:mm:ss`
    ///
    /// Each field is printed as two digits taken modulo 100.
    pub fn format(&self) -> String<CLOCK_TEXT_LEN> {
        let mut text = String::new();
        let _ = write!(
            text,
            "T {:02}:{:02}:{:02}",
            self.hour % 100,
            self.minute % 100,
            self.second % 100
        );
        text
    }
}

/// Source of wall-clock time
pub trait ClockSource {
    /// Current time of day
    fn now(&self) -> ClockReading;
}

impl ClockSource for ClockReading {
    fn now(&self) -> ClockReading {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_fields() {
        assert_eq!(ClockReading::new(7, 5, 9).format().as_str(), "T 07:05:09");
        assert_eq!(ClockReading::new(23, 59, 58).format().as_str(), "T 23:59:58");
    }

    #[test]
    fn test_from_seconds_wraps_day() {
        assert_eq!(ClockReading::from_seconds(3_723), ClockReading::new(1, 2, 3));
        assert_eq!(ClockReading::from_seconds(86_400 + 61), ClockReading::new(0, 1, 1));
    }
}
