//! Bounded circular queue of account numbers awaiting processing

use super::result::{Error, Result};

/// Fixed-size ring buffer
///
/// `front` indexes the oldest entry and `len` counts live entries, which
/// keeps the full and empty states distinct without a sentinel.
#[derive(Debug, Clone)]
pub struct PendingQueue {
    slots: Box<[u32]>,
    front: usize,
    len: usize,
}

impl PendingQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            front: 0,
            len: 0,
        }
    }

    pub fn enqueue(&mut self, account_number: u32) -> Result<()> {
        if self.is_full() {
            return Err(Error::QueueFull);
        }
        let rear = (self.front + self.len) % self.slots.len();
        self.slots[rear] = account_number;
        self.len += 1;
        Ok(())
    }

    /// Remove the oldest entry
    pub fn dequeue(&mut self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        let account_number = self.slots[self.front];
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        Some(account_number)
    }

    /// Remove every entry in FIFO order, leaving the queue empty
    pub fn drain_all(&mut self) -> Vec<u32> {
        let capacity = self.slots.len();
        let drained: Vec<u32> = (0..self.len)
            .map(|offset| self.slots[(self.front + offset) % capacity])
            .collect();
        self.front = 0;
        self.len = 0;
        drained
    }

    /// Oldest entry without removing it
    pub fn front(&self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.front])
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = PendingQueue::new(4);
        for n in [5, 3, 9] {
            queue.enqueue(n).unwrap();
        }
        assert_eq!(queue.front(), Some(5));
        assert_eq!(queue.drain_all(), vec![5, 3, 9]);
        assert!(queue.is_empty());
        assert!(queue.front().is_none());
    }

    #[test]
    fn test_full_queue_rejects_without_mutation() {
        let mut queue = PendingQueue::new(3);
        for n in 1..=3 {
            queue.enqueue(n).unwrap();
        }
        assert!(queue.is_full());
        assert!(matches!(queue.enqueue(4), Err(Error::QueueFull)));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.drain_all(), vec![1, 2, 3]);
    }

    #[test]
    fn test_wraparound_keeps_order() {
        let mut queue = PendingQueue::new(3);
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(2));

        // front now sits on the last slot, so the next writes wrap
        queue.enqueue(7).unwrap();
        queue.enqueue(8).unwrap();
        queue.enqueue(9).unwrap();
        assert!(queue.is_full());
        assert!(matches!(queue.enqueue(10), Err(Error::QueueFull)));
        assert_eq!(queue.drain_all(), vec![7, 8, 9]);
    }

    #[test]
    fn test_dequeue_empty() {
        let mut queue = PendingQueue::new(2);
        assert!(queue.dequeue().is_none());
        queue.enqueue(4).unwrap();
        assert_eq!(queue.dequeue(), Some(4));
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_drain_empty_queue() {
        let mut queue = PendingQueue::new(2);
        assert!(queue.drain_all().is_empty());
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        assert_eq!(queue.drain_all(), vec![1, 2]);
        queue.enqueue(3).unwrap();
        assert_eq!(queue.drain_all(), vec![3]);
    }

    #[test]
    fn test_zero_capacity_is_always_full() {
        let mut queue = PendingQueue::new(0);
        assert!(queue.is_full());
        assert!(matches!(queue.enqueue(1), Err(Error::QueueFull)));
        assert!(queue.drain_all().is_empty());
    }
}
