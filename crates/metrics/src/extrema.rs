/// Session-long minimum and maximum of a metric.
///
/// Starts at `{min: +inf, max: 0}` and only ever widens.  Not windowed: a
/// value that has scrolled out of the [`History`](crate::History) still
/// counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    min: f64,
    max: f64,
    observations: u64,
}

impl Default for Extrema {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: 0.0,
            observations: 0,
        }
    }
}

impl Extrema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one sample and return the updated `(min, max)`.
    pub fn observe(&mut self, sample: f64) -> (f64, f64) {
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
        self.observations += 1;
        (self.min, self.max)
    }

    pub fn has_observations(&self) -> bool {
        self.observations > 0
    }

    /// `(min, max)` once at least one sample has been seen; never exposes
    /// the infinite starting minimum.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.has_observations().then_some((self.min, self.max))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unobserved_has_no_range() {
        let e = Extrema::new();
        assert!(!e.has_observations());
        assert_eq!(e.range(), None);
        assert!(e.min().is_infinite());
    }

    #[test]
    fn widens_with_samples() {
        let mut e = Extrema::new();
        assert_eq!(e.observe(4.0), (4.0, 4.0));
        assert_eq!(e.observe(1.5), (1.5, 4.0));
        assert_eq!(e.observe(9.0), (1.5, 9.0));
        assert_eq!(e.observe(3.0), (1.5, 9.0));
        assert_eq!(e.range(), Some((1.5, 9.0)));
    }

    #[test]
    fn max_floor_is_zero() {
        let mut e = Extrema::new();
        e.observe(0.0);
        assert_eq!(e.range(), Some((0.0, 0.0)));
    }

    proptest! {
        #[test]
        fn monotonic(samples in prop::collection::vec(0.0f64..1e12, 1..100)) {
            let mut e = Extrema::new();
            let (mut prev_min, mut prev_max) = (f64::INFINITY, 0.0);
            for &s in &samples {
                let (min, max) = e.observe(s);
                prop_assert!(min <= prev_min);
                prop_assert!(max >= prev_max);
                prop_assert!(min <= s && s <= max);
                prev_min = min;
                prev_max = max;
            }
            for &s in &samples {
                prop_assert!(e.min() <= s && s <= e.max());
            }
        }
    }
}
