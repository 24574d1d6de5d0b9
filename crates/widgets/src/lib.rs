pub mod banner;
pub mod card;
pub mod clients;
pub mod format;
pub mod header;
pub mod requests;
pub mod sparkline;

pub use banner::ErrorBanner;
pub use card::MetricCard;
pub use clients::ClientsTable;
pub use format::NumberLocale;
pub use header::Header;
pub use requests::{group_requests, RequestGroup, RequestsTable};
pub use sparkline::Sparkline;
