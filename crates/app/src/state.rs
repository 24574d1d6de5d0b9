use statdash_core::{StatsSnapshot, Timestamp};
use statdash_metrics::{MetricsEngine, TickReport};
use tracing::{debug, info};

/// Everything the dashboard knows about the proxy for this session.
///
/// Only successful polls reach the engine. A failed poll sets the banner
/// text and leaves history, extrema and the last snapshot untouched.
#[derive(Debug)]
pub struct DashboardState {
    engine:        MetricsEngine,
    interval_secs: f64,
    snapshot:      Option<StatsSnapshot>,
    error:         Option<String>,
    last_update:   Option<Timestamp>,
}

impl DashboardState {
    pub fn new(capacity: usize, interval_secs: f64) -> Self {
        Self {
            engine: MetricsEngine::new(capacity),
            interval_secs,
            snapshot: None,
            error: None,
            last_update: None,
        }
    }

    /// Feed a successful poll through the engine and clear any error.
    pub fn apply_stats(&mut self, snapshot: StatsSnapshot, received_at: Timestamp) -> TickReport {
        let report = self.engine.ingest(&snapshot, self.interval_secs);
        if self.snapshot.is_some() {
            for (id, _) in report.iter().filter(|(_, sample)| sample.is_none()) {
                info!(metric = ?id, reading = id.read(&snapshot), "Counter went backwards, rebaselined");
            }
        }
        if self.error.take().is_some() {
            debug!("Proxy reachable again");
        }
        self.snapshot = Some(snapshot);
        self.last_update = Some(received_at);
        report
    }

    pub fn apply_failure(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> Option<&StatsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_update(&self) -> Option<Timestamp> {
        self.last_update
    }
}

/// Banner text for a failed poll.
pub fn banner_text(detail: &impl std::fmt::Display) -> String {
    format!("Cannot reach the proxy server: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use statdash_client::{decode, FetchError};
    use statdash_metrics::MetricId;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000);

    fn stats(requests: u64) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: requests,
            active_clients: 2,
            ..StatsSnapshot::default()
        }
    }

    #[test]
    fn two_ticks_give_a_request_rate() {
        let mut state = DashboardState::new(60, 5.0);

        let first = state.apply_stats(stats(100), T0);
        assert_eq!(first.sample(MetricId::Requests), None);

        let second = state.apply_stats(stats(130), T0);
        assert_eq!(second.sample(MetricId::Requests), Some(6.0));
        assert_eq!(state.engine().values(MetricId::Requests), vec![6.0]);
    }

    #[test]
    fn server_error_leaves_engine_untouched() {
        let mut state = DashboardState::new(60, 5.0);
        state.apply_stats(stats(100), T0);
        state.apply_stats(stats(130), T0);

        let body = br#"{"error":"db down","total_requests":0,"total_bytes_in":0,"total_bytes_out":0,"active_clients":0}"#;
        let err = decode(body).unwrap_err();
        assert!(matches!(err, FetchError::Server(ref m) if m == "db down"));
        state.apply_failure(banner_text(&err));

        assert_eq!(state.engine().values(MetricId::Requests), vec![6.0]);
        assert_eq!(state.engine().values(MetricId::ActiveClients), vec![2.0, 2.0]);
        let extrema = state.engine().state(MetricId::Requests).unwrap().extrema();
        assert_eq!(extrema.range(), Some((6.0, 6.0)));
        assert_eq!(state.snapshot().unwrap().total_requests, 130);
        assert_eq!(state.error(), Some("Cannot reach the proxy server: server reported: db down"));
    }

    #[test]
    fn success_after_failure_clears_banner() {
        let mut state = DashboardState::new(60, 5.0);
        state.apply_failure(banner_text(&"connection refused"));
        assert!(state.error().is_some());
        assert_eq!(state.last_update(), None);

        state.apply_stats(stats(10), T0);
        assert_eq!(state.error(), None);
        assert_eq!(state.last_update(), Some(T0));
    }

    #[test]
    fn failure_keeps_rate_baseline() {
        let mut state = DashboardState::new(60, 5.0);
        state.apply_stats(stats(100), T0);
        state.apply_failure(banner_text(&"timeout"));
        let report = state.apply_stats(stats(150), T0);
        assert_eq!(report.sample(MetricId::Requests), Some(10.0));
    }

    #[test]
    fn counter_reset_after_restart_rebaselines() {
        let mut state = DashboardState::new(60, 5.0);
        state.apply_stats(stats(100), T0);
        state.apply_stats(stats(130), T0);

        let reset = state.apply_stats(stats(20), T0);
        assert_eq!(reset.sample(MetricId::Requests), None);
        assert_eq!(reset.sample(MetricId::ActiveClients), Some(2.0));
        assert_eq!(state.engine().values(MetricId::Requests), vec![6.0]);

        let next = state.apply_stats(stats(45), T0);
        assert_eq!(next.sample(MetricId::Requests), Some(5.0));
    }
}
