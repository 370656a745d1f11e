//! Recording I2C bus for unit tests

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use heapless::Vec;

/// Longest write the driver issues: one page plus control byte
pub const MAX_WRITE: usize = 129;

/// Bus that records every write and can be told to fail
#[derive(Default)]
pub struct RecordingBus {
    pub writes: Vec<Vec<u8, MAX_WRITE>, 64>,
    pub addresses: Vec<u8, 64>,
    fail: bool,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus whose every transaction fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Command bytes sent so far, in order
    pub fn command_bytes(&self) -> Vec<u8, 64> {
        self.writes
            .iter()
            .filter(|w| w.len() == 2 && w[0] == 0x00)
            .map(|w| w[1])
            .collect()
    }
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c for RecordingBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations.iter_mut() {
            if let Operation::Write(bytes) = op {
                let mut write = Vec::new();
                let _ = write.extend_from_slice(bytes);
                // Oldest writes are dropped once the log is full
                if self.writes.is_full() {
                    self.writes.remove(0);
                    self.addresses.remove(0);
                }
                let _ = self.writes.push(write);
                let _ = self.addresses.push(address);
            }
        }
        Ok(())
    }
}
