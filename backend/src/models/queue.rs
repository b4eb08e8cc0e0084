//! FIFO queue
//!
//! Ordered container used for the admission queue and the four waiting lines.
//! Elements leave in the order they entered; there is no reordering.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// First-in-first-out queue
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::FifoQueue;
///
/// let mut queue = FifoQueue::new();
/// queue.enqueue("P1");
/// queue.enqueue("P2");
///
/// assert_eq!(queue.peek(), Some(&"P1"));
/// assert_eq!(queue.dequeue(), Some("P1"));
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FifoQueue<T> {
    items: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append an element at the back
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove and return the front element, if any
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Front element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate front to back
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for FifoQueue<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for FifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for FifoQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_empty_returns_none() {
        let mut queue: FifoQueue<u32> = FifoQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut queue: FifoQueue<u32> = vec![1, 2].into();
        queue.enqueue(3);
        queue.extend([4, 5]);

        let drained: Vec<u32> = std::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(drained, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_iter_does_not_consume() {
        let queue: FifoQueue<&str> = ["a", "b"].into_iter().collect();
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(queue.len(), 2);
    }
}
