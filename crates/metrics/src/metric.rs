use statdash_core::StatsSnapshot;

/// Whether a metric is differenced into a rate or plotted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Monotonically non-decreasing total; plotted as a per-second rate.
    Counter,
    /// Instantaneous absolute value; plotted raw.
    Gauge,
}

/// The metrics tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricId {
    Requests,
    BytesIn,
    BytesOut,
    ActiveClients,
}

impl MetricId {
    pub const ALL: [Self; 4] = [Self::Requests, Self::BytesIn, Self::BytesOut, Self::ActiveClients];

    #[must_use]
    pub const fn kind(self) -> MetricKind {
        match self {
            Self::Requests | Self::BytesIn | Self::BytesOut => MetricKind::Counter,
            Self::ActiveClients => MetricKind::Gauge,
        }
    }

    /// Raw value of this metric in a snapshot: the cumulative total for
    /// counters, the instantaneous reading for gauges.
    #[must_use]
    pub fn read(self, snapshot: &StatsSnapshot) -> u64 {
        match self {
            Self::Requests      => snapshot.total_requests,
            Self::BytesIn       => snapshot.total_bytes_in,
            Self::BytesOut      => snapshot.total_bytes_out,
            Self::ActiveClients => snapshot.active_clients,
        }
    }
}
