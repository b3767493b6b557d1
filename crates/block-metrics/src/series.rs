//! Fixed-capacity FIFO series of samples.

use std::collections::VecDeque;

/// An ordered window of the most recent samples, oldest first.
///
/// Pushing at capacity evicts the oldest sample before appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedSeries {
    samples: VecDeque<u64>,
    capacity: usize,
}

impl BoundedSeries {
    /// Create an empty series holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<u64> {
        self.samples.back().copied()
    }

    /// Samples in display order (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.iter().copied()
    }

    /// Copy the samples out, oldest first.
    pub fn to_vec(&self) -> Vec<u64> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_below_capacity() {
        let mut series = BoundedSeries::new(3);
        series.push(1);
        series.push(2);
        assert_eq!(series.to_vec(), vec![1, 2]);
        assert_eq!(series.latest(), Some(2));
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let mut series = BoundedSeries::new(100);
        for s in 0..=100 {
            series.push(s);
        }
        assert_eq!(series.len(), 100);
        assert_eq!(series.to_vec(), (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut series = BoundedSeries::new(0);
        series.push(7);
        assert!(series.is_empty());
    }

    proptest! {
        #[test]
        fn prop_length_is_min_of_pushes_and_capacity(
            capacity in 1usize..64,
            samples in proptest::collection::vec(any::<u64>(), 0..200),
        ) {
            let mut series = BoundedSeries::new(capacity);
            for &s in &samples {
                series.push(s);
                prop_assert!(series.len() <= capacity);
            }
            prop_assert_eq!(series.len(), samples.len().min(capacity));
        }

        #[test]
        fn prop_keeps_newest_in_order(
            capacity in 1usize..64,
            samples in proptest::collection::vec(any::<u64>(), 0..200),
        ) {
            let mut series = BoundedSeries::new(capacity);
            for &s in &samples {
                series.push(s);
            }
            let skip = samples.len().saturating_sub(capacity);
            prop_assert_eq!(series.to_vec(), samples[skip..].to_vec());
        }
    }
}
