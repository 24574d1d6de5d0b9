use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// One poll's worth of data as served by the proxy's stats endpoint.
///
/// The four totals are required; the two tables and the build metadata are
/// optional and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Cumulative number of proxied requests since the server started.
    pub total_requests: u64,
    /// Cumulative bytes received from clients.
    pub total_bytes_in: u64,
    /// Cumulative bytes sent to clients.
    pub total_bytes_out: u64,
    /// Clients seen within the server's activity window (a gauge).
    pub active_clients: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recent_requests: Vec<RecentRequest>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_stats: Vec<ClientStat>,
    /// When the proxy process started.
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub build_date: Option<String>,
}

/// A single proxied request from the server's recent-request ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRequest {
    pub timestamp: Timestamp,
    pub client_ip: String,
    pub method:    String,
    pub host:      String,
    pub path:      String,
    pub status:    u16,
    #[serde(default)]
    pub bytes_in:  u64,
    #[serde(default)]
    pub bytes_out: u64,
}

/// Per-client traffic totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStat {
    pub ip:          String,
    #[serde(default)]
    pub bytes_in:    u64,
    #[serde(default)]
    pub bytes_out:   u64,
    #[serde(default)]
    pub bytes_total: u64,
    #[serde(default)]
    pub requests:    u64,
    pub last_seen:   Timestamp,
}

/// Wall-clock instant with millisecond resolution.
///
/// Deserializes from either epoch milliseconds or an RFC 3339 string and
/// always serializes as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The instant in the local time zone, `None` if out of chrono's range.
    pub fn to_local(self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.with_timezone(&Local))
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = String;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Millis(ms) => Ok(Self(ms)),
            RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Self(dt.timestamp_millis()))
                .map_err(|e| format!("invalid timestamp '{s}': {e}")),
        }
    }
}

/// Go-style servers encode an empty slice as `null`; treat it like `[]`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_document() {
        let raw = r#"{
            "total_requests": 130,
            "total_bytes_in": 2048,
            "total_bytes_out": 4096,
            "active_clients": 2,
            "recent_requests": [{
                "timestamp": 1700000000000, "client_ip": "10.0.0.2", "method": "GET",
                "host": "example.org", "path": "/", "status": 200,
                "bytes_in": 10, "bytes_out": 20
            }],
            "client_stats": [{
                "ip": "10.0.0.2", "bytes_in": 10, "bytes_out": 20, "bytes_total": 30,
                "requests": 1, "last_seen": 1700000000000
            }],
            "version": "1.4.0"
        }"#;

        let snap: StatsSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.total_requests, 130);
        assert_eq!(snap.recent_requests.len(), 1);
        assert_eq!(snap.recent_requests[0].timestamp.as_millis(), 1_700_000_000_000);
        assert_eq!(snap.client_stats[0].bytes_total, 30);
        assert_eq!(snap.version.as_deref(), Some("1.4.0"));
        assert!(snap.start_time.is_none());
    }

    #[test]
    fn missing_or_null_tables_default_to_empty() {
        let raw = r#"{"total_requests":1,"total_bytes_in":0,"total_bytes_out":0,
                      "active_clients":0,"client_stats":null}"#;
        let snap: StatsSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snap.recent_requests.is_empty());
        assert!(snap.client_stats.is_empty());
    }

    #[test]
    fn missing_counter_is_an_error() {
        let raw = r#"{"total_requests":1,"total_bytes_in":0,"active_clients":0}"#;
        assert!(serde_json::from_str::<StatsSnapshot>(raw).is_err());
    }

    #[test]
    fn timestamp_accepts_rfc3339() {
        let ts: Timestamp = serde_json::from_str(r#""2023-11-14T22:13:20Z""#).unwrap();
        assert_eq!(ts.as_millis(), 1_700_000_000_000);

        let ts: Timestamp = serde_json::from_str(r#""2023-11-14T23:13:20.5+01:00""#).unwrap();
        assert_eq!(ts.as_millis(), 1_700_000_000_500);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>(r#""yesterday""#).is_err());
    }

    #[test]
    fn timestamp_serializes_as_millis() {
        let json = serde_json::to_string(&Timestamp::from_millis(42)).unwrap();
        assert_eq!(json, "42");
    }
}
