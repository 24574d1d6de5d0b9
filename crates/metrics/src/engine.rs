use crate::extrema::Extrema;
use crate::history::History;
use crate::metric::{MetricId, MetricKind};
use crate::plot::{map_to_points, PlotPoint};
use crate::rate::CounterRate;
use statdash_core::StatsSnapshot;
use std::collections::HashMap;
use tracing::debug;

/// Direction of the last change of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// Everything the engine remembers about one metric for the session.
#[derive(Debug, Clone)]
pub struct MetricState {
    /// Baseline tracker; `None` for gauges, which are never differenced.
    rate:         Option<CounterRate>,
    history:      History,
    extrema:      Extrema,
    /// Previous raw reading, compared against for [`Trend`].
    last_reading: u64,
    trend:        Trend,
}

impl MetricState {
    fn new(id: MetricId, capacity: usize) -> Self {
        Self {
            rate: match id.kind() {
                MetricKind::Counter => Some(CounterRate::new()),
                MetricKind::Gauge => None,
            },
            history:      History::new(capacity),
            extrema:      Extrema::new(),
            last_reading: 0,
            trend:        Trend::Stable,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn extrema(&self) -> &Extrema {
        &self.extrema
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Most recent plotted sample (rate for counters, value for gauges).
    pub fn current(&self) -> Option<f64> {
        self.history.latest()
    }
}

/// What one [`MetricsEngine::ingest`] call produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    samples: Vec<(MetricId, Option<f64>)>,
}

impl TickReport {
    /// The sample plotted for `id` this tick; `None` if the tick only set a
    /// counter baseline.
    pub fn sample(&self, id: MetricId) -> Option<f64> {
        self.samples
            .iter()
            .find_map(|&(m, s)| if m == id { s } else { None })
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricId, Option<f64>)> + '_ {
        self.samples.iter().copied()
    }
}

/// Rolling Metrics Engine: one [`MetricState`] per [`MetricId`].
///
/// Created once per session and owned by whoever drives the polling loop;
/// it holds no interior mutability, so callers serialise access simply by
/// holding `&mut`.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    capacity: usize,
    metrics:  HashMap<MetricId, MetricState>,
}

impl MetricsEngine {
    pub fn new(capacity: usize) -> Self {
        let metrics = MetricId::ALL
            .into_iter()
            .map(|id| (id, MetricState::new(id, capacity)))
            .collect();
        Self { capacity, metrics }
    }

    /// Configured history length; the plot's horizontal divisor.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self, id: MetricId) -> Option<&MetricState> {
        self.metrics.get(&id)
    }

    fn state_mut(&mut self, id: MetricId) -> &mut MetricState {
        let capacity = self.capacity;
        self.metrics
            .entry(id)
            .or_insert_with(|| MetricState::new(id, capacity))
    }

    // ── Component operations ─────────────────────────────────────────────────

    /// Difference a counter reading against its baseline.  Always `None` for
    /// gauges.
    pub fn compute_rate(&mut self, id: MetricId, cumulative: u64, interval_secs: f64) -> Option<f64> {
        self.state_mut(id)
            .rate
            .as_mut()
            .and_then(|r| r.compute(cumulative, interval_secs))
    }

    pub fn append(&mut self, id: MetricId, sample: f64) {
        self.state_mut(id).history.push(sample);
    }

    /// Current history of `id`, oldest first.
    pub fn values(&self, id: MetricId) -> Vec<f64> {
        self.state(id)
            .map(|s| s.history.values().collect())
            .unwrap_or_default()
    }

    pub fn observe(&mut self, id: MetricId, sample: f64) -> (f64, f64) {
        self.state_mut(id).extrema.observe(sample)
    }

    /// Polyline for `id` inside a `width × height` box.
    pub fn points(&self, id: MetricId, width: f32, height: f32) -> Vec<PlotPoint> {
        match self.state(id) {
            Some(s) => map_to_points(s.history.values(), self.capacity, width, height),
            None => Vec::new(),
        }
    }

    // ── Per-poll driver ──────────────────────────────────────────────────────

    /// Feed one snapshot taken `interval_secs` after the previous one.
    ///
    /// Counters become rates (skipped on a baseline tick); the gauge is
    /// recorded raw.  Every produced sample lands in history and extrema.
    pub fn ingest(&mut self, snapshot: &StatsSnapshot, interval_secs: f64) -> TickReport {
        let mut samples = Vec::with_capacity(MetricId::ALL.len());

        for id in MetricId::ALL {
            let reading = id.read(snapshot);
            let sample = match id.kind() {
                MetricKind::Counter => self.compute_rate(id, reading, interval_secs),
                MetricKind::Gauge => {
                    let state = self.state_mut(id);
                    state.trend = match reading.cmp(&state.last_reading) {
                        std::cmp::Ordering::Greater => Trend::Up,
                        std::cmp::Ordering::Less    => Trend::Down,
                        std::cmp::Ordering::Equal   => Trend::Stable,
                    };
                    Some(reading as f64)
                }
            };
            self.state_mut(id).last_reading = reading;

            if let Some(value) = sample {
                self.append(id, value);
                self.observe(id, value);
            }
            samples.push((id, sample));
        }

        debug!(?samples, "Ingested stats snapshot");
        TickReport { samples }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(crate::DEFAULT_CAPACITY)
    }
}
