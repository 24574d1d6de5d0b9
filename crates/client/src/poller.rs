use crate::client::StatsClient;
use crate::error::FetchError;
use statdash_core::StatsSnapshot;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Result of one poll.
pub type PollOutcome = Result<StatsSnapshot, FetchError>;

/// Spawn a background Tokio task that fetches the stats document every
/// `interval` and forwards each outcome through the returned channel.
///
/// Fetches never overlap: the task awaits each response before waiting for
/// the next tick, and ticks missed while a slow request was in flight are
/// skipped.  Outcomes therefore arrive in request order.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_poller(client: StatsClient, interval: Duration) -> mpsc::Receiver<PollOutcome> {
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let outcome = client.fetch().await;

            match &outcome {
                Ok(snapshot) => debug!(
                    total_requests = snapshot.total_requests,
                    active_clients = snapshot.active_clients,
                    "Stats fetched"
                ),
                Err(e) => warn!(kind = e.kind(), endpoint = client.endpoint(), "Stats fetch failed: {e}"),
            }

            if tx.send(outcome).await.is_err() {
                break; // all receivers dropped
            }
        }
    });

    rx
}
