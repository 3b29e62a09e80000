//! Fixed-capacity history buffer

use std::collections::VecDeque;

/// Keeps the last `limit` values pushed, dropping from the front
///
/// Backs the store's dispatched-action history.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    limit: usize,
}

impl<T> RingBuffer<T> {
    /// `limit` is raised to 1 if zero
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            items: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, value: T) {
        while self.items.len() >= self.limit {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut buf = RingBuffer::new(3);
        for i in 1..=4 {
            buf.push(i);
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.latest(), Some(&4));
        let items: Vec<_> = buf.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4]);
    }

    #[test]
    fn test_ring_buffer_zero_capacity_is_clamped() {
        let mut buf = RingBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push("a");
        buf.push("b");
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_ring_buffer_clear_keeps_capacity() {
        let mut buf = RingBuffer::new(2);
        buf.push(1);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn test_ring_buffer_empty() {
        let buf: RingBuffer<i32> = RingBuffer::new(5);
        assert!(buf.is_empty());
        assert_eq!(buf.latest(), None);
    }
}
