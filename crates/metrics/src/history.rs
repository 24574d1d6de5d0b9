use std::collections::VecDeque;

/// Rolling history of metric samples for sparkline rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl History {
    /// A zero capacity is bumped to one so the newest sample is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples in insertion order, oldest first.
    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
        self.samples.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Largest sample currently in the window.
    pub fn peak(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_last_n_in_order() {
        let mut h = History::new(3);
        for v in 1..=5 {
            h.push(f64::from(v));
        }
        assert_eq!(h.values().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_eq!(h.latest(), Some(5.0));
        assert_eq!(h.peak(), Some(5.0));
    }

    #[test]
    fn partial_buffer() {
        let mut h = History::new(60);
        h.push(2.0);
        h.push(1.0);
        assert_eq!(h.len(), 2);
        assert_eq!(h.capacity(), 60);
        assert_eq!(h.peak(), Some(2.0));
    }

    #[test]
    fn empty_history() {
        let h = History::new(0);
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.latest(), None);
        assert_eq!(h.peak(), None);
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(cap in 1usize..80, samples in prop::collection::vec(0.0f64..1e9, 0..200)) {
            let mut h = History::new(cap);
            for &s in &samples {
                h.push(s);
                prop_assert!(h.len() <= cap);
            }
            let kept: Vec<f64> = h.values().collect();
            let start = samples.len().saturating_sub(cap);
            prop_assert_eq!(kept, samples[start..].to_vec());
        }
    }
}
