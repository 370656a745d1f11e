//! Bounded FIFO display queue
//!
//! Records are copied in on push and copied out on pop or peek. Order is
//! strictly insertion order; there is no priority.

use heapless::Deque;

use crate::error::QueueError;
use crate::record::DisplayRecord;

/// Default number of pending records
pub const QUEUE_CAPACITY: usize = 8;

/// Fixed-capacity FIFO of display records
#[derive(Debug, Clone)]
pub struct DisplayQueue<const N: usize = QUEUE_CAPACITY> {
    records: Deque<DisplayRecord, N>,
}

impl<const N: usize> Default for DisplayQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DisplayQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
        }
    }

    /// Append a record at the tail
    ///
    /// Fails with [`QueueError::Full`] and leaves the queue unchanged when
    /// `N` records are already pending.
    pub fn push(&mut self, record: DisplayRecord) -> Result<(), QueueError> {
        self.records.push_back(record).map_err(|_| QueueError::Full)
    }

    /// Remove and return the oldest record
    pub fn pop(&mut self) -> Option<DisplayRecord> {
        self.records.pop_front()
    }

    /// Copy of the oldest record, without removing it
    pub fn peek(&self) -> Option<DisplayRecord> {
        self.records.front().cloned()
    }

    /// Borrow the oldest record
    pub fn front(&self) -> Option<&DisplayRecord> {
        self.records.front()
    }

    /// Discard every pending record
    pub fn flush(&mut self) {
        self.records.clear();
    }

    /// Number of pending records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Check if no record is pending
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if another push would fail
    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pending records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &DisplayRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, PayloadSource};

    fn rec(tag: &'static str) -> DisplayRecord {
        DisplayRecord::from_sources(
            4,
            4,
            [
                PayloadSource::Literal(tag),
                PayloadSource::Literal(""),
                PayloadSource::Literal(""),
            ],
        )
    }

    #[test]
    fn test_fifo_order() {
        let mut q: DisplayQueue = DisplayQueue::new();
        q.push(rec("A")).unwrap();
        q.push(rec("B")).unwrap();
        q.push(rec("C")).unwrap();

        assert_eq!(q.pop().unwrap().line(0), "A");
        assert_eq!(q.pop().unwrap().line(0), "B");
        assert_eq!(q.pop().unwrap().line(0), "C");
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_full_push_leaves_queue_unchanged() {
        let mut q: DisplayQueue<2> = DisplayQueue::new();
        q.push(rec("A")).unwrap();
        q.push(rec("B")).unwrap();
        assert!(q.is_full());

        assert_eq!(q.push(rec("C")), Err(QueueError::Full));
        assert_eq!(q.count(), 2);
        let lines: heapless::Vec<&str, 2> = q.iter().map(|r| r.line(0)).collect();
        assert_eq!(lines.as_slice(), &["A", "B"]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut q: DisplayQueue = DisplayQueue::new();
        assert_eq!(q.peek(), None);
        q.push(rec("A")).unwrap();

        assert_eq!(q.peek().unwrap().line(0), "A");
        assert_eq!(q.count(), 1);
        assert_eq!(q.front().map(|r| r.payloads[0].clone()), Some(Payload::from_text("A")));
    }

    #[test]
    fn test_flush() {
        let mut q: DisplayQueue = DisplayQueue::new();
        q.push(rec("A")).unwrap();
        q.push(rec("B")).unwrap();
        q.flush();

        assert!(q.is_empty());
        assert_eq!(q.count(), 0);
        assert_eq!(q.capacity(), QUEUE_CAPACITY);
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut q: DisplayQueue<4> = DisplayQueue::new();
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }
}
