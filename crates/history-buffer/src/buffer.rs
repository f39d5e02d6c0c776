//! Bounded FIFO Buffer Implementation

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fixed-capacity FIFO over recent samples (oldest evicted first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> HistoryBuffer<T> {
    /// Create a buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history buffer capacity must be non-zero");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest if the buffer is full
    pub fn push(&mut self, value: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum number of samples the buffer holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed sample
    pub fn latest(&self) -> Option<T> {
        self.data.back().copied()
    }

    /// Iterate samples oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Drop all samples, keeping the capacity
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl HistoryBuffer<f32> {
    /// Arithmetic mean over however many samples exist.
    ///
    /// The divisor is the current length, not the capacity, so the
    /// mean is meaningful during the first `capacity - 1` frames of a
    /// session. Empty buffers yield `None`.
    pub fn mean(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        let sum: f32 = self.data.iter().sum();
        Some(sum / self.data.len() as f32)
    }
}

impl HistoryBuffer<(f32, f32)> {
    /// Componentwise mean over however many pairs exist
    pub fn mean(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let n = self.data.len() as f32;
        let (sum_a, sum_b) = self
            .data
            .iter()
            .fold((0.0f32, 0.0f32), |(a, b), &(x, y)| (a + x, b + y));
        Some((sum_a / n, sum_b / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_and_len() {
        let mut buffer = HistoryBuffer::new(10);
        for i in 0..5 {
            buffer.push(i as f32);
        }
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.latest(), Some(4.0));
    }

    #[test]
    fn test_evicts_oldest() {
        let mut buffer = HistoryBuffer::new(3);
        for i in 0..5 {
            buffer.push(i as f32);
        }
        assert_eq!(buffer.len(), 3);
        let held: Vec<f32> = buffer.iter().copied().collect();
        assert_eq!(held, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mean_partial_fill() {
        let mut buffer = HistoryBuffer::new(100);
        buffer.push(0.2);
        buffer.push(0.4);
        // Divisor is the sample count, not the capacity
        assert!((buffer.mean().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        let buffer: HistoryBuffer<f32> = HistoryBuffer::new(5);
        assert_eq!(buffer.mean(), None);
    }

    #[test]
    fn test_pair_mean() {
        let mut buffer = HistoryBuffer::new(5);
        buffer.push((0.2, 0.8));
        buffer.push((0.4, 0.6));
        let (h, v) = buffer.mean().unwrap();
        assert!((h - 0.3).abs() < 1e-6);
        assert!((v - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut buffer = HistoryBuffer::new(4);
        buffer.push(1.0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
    }

    proptest! {
        /// Pushing more than `capacity` values leaves exactly the last
        /// `capacity` values, in push order.
        #[test]
        fn holds_last_capacity_values(
            capacity in 1usize..50,
            values in prop::collection::vec(-1e6f32..1e6, 0..200),
        ) {
            let mut buffer = HistoryBuffer::new(capacity);
            for &v in &values {
                buffer.push(v);
            }
            let held: Vec<f32> = buffer.iter().copied().collect();
            let expected: Vec<f32> = values
                .iter()
                .copied()
                .skip(values.len().saturating_sub(capacity))
                .collect();
            prop_assert_eq!(held, expected);
            prop_assert!(buffer.len() <= capacity);
        }
    }
}
