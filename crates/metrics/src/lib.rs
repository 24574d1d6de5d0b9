//! Rolling Metrics Engine.
//!
//! Turns a stream of proxy stats snapshots into per-metric plot data:
//! - [`rate`]     per-second rates from cumulative counters
//! - [`history`]  fixed-capacity FIFO of recent samples
//! - [`extrema`]  session-long min/max
//! - [`plot`]     history → polyline coordinates
//! - [`engine`]   one [`MetricState`] per [`MetricId`], fed once per poll

pub mod engine;
pub mod extrema;
pub mod history;
pub mod metric;
pub mod plot;
pub mod rate;

pub use engine::{MetricState, MetricsEngine, TickReport, Trend};
pub use extrema::Extrema;
pub use history::History;
pub use metric::{MetricId, MetricKind};
pub use plot::{map_to_points, PlotPoint};
pub use rate::CounterRate;

/// Default number of samples kept per metric.
pub const DEFAULT_CAPACITY: usize = 60;
