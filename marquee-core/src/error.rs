//! Display queue errors
//!
//! None of these are fatal. Callers decide whether to retry or drop.

use core::fmt;

/// Errors reported by queue and scheduler operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Push attempted against a full queue
    Full,
    /// Scheduler was constructed inactive (panel absent)
    Disabled,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Full => f.write_str("display queue full"),
            QueueError::Disabled => f.write_str("display scheduler disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use core::fmt::Write;

    #[test]
    fn test_display_messages() {
        let mut text: String<32> = String::new();
        write!(text, "{}", QueueError::Full).unwrap();
        assert_eq!(text.as_str(), "display queue full");

        text.clear();
        write!(text, "{}", QueueError::Disabled).unwrap();
        assert_eq!(text.as_str(), "display scheduler disabled");
    }
}
