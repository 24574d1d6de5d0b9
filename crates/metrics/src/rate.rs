/// Derives a per-second rate from successive readings of a cumulative counter.
///
/// The first reading only seeds the baseline.  A reading lower than the
/// previous one means the counter was reset (server restart) and also just
/// re-seeds the baseline, so no negative rate or zero-baseline spike is
/// ever produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterRate {
    last: Option<u64>,
}

impl CounterRate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The baseline the next reading will be differenced against.
    pub fn baseline(&self) -> Option<u64> {
        self.last
    }

    /// Feed the latest cumulative value.  Returns units/second, or `None`
    /// when this reading became the new baseline.
    ///
    /// A non-positive interval yields `None` and leaves the baseline alone.
    pub fn compute(&mut self, cumulative: u64, interval_secs: f64) -> Option<f64> {
        if interval_secs.is_nan() || interval_secs <= 0.0 {
            return None;
        }

        let previous = self.last.replace(cumulative)?;
        let delta = cumulative.checked_sub(previous)?;
        Some(delta as f64 / interval_secs)
    }
}
