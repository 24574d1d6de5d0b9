//! Stats endpoint client.
//!
//! [`StatsClient`] performs one GET + decode; [`spawn_poller`] drives it on a
//! fixed interval from a background Tokio task.

pub mod client;
pub mod error;
pub mod poller;

pub use client::{decode, StatsClient};
pub use error::FetchError;
pub use poller::{spawn_poller, PollOutcome};
