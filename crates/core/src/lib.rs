pub mod appearance;
pub mod error;
pub mod event;
pub mod state;

pub use appearance::{ColorScheme, ThemePreference};
pub use error::{DashError, Result};
pub use event::Message;
pub use state::{ClientStat, RecentRequest, StatsSnapshot, Timestamp};
