use crate::error::FetchError;
use reqwest::header::ACCEPT;
use statdash_core::StatsSnapshot;
use std::time::Duration;

/// HTTP client for the proxy's JSON stats document.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http:     reqwest::Client,
    endpoint: String,
}

impl StatsClient {
    /// Build a client for `endpoint`; every request is bounded by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("statdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and decode one snapshot.
    pub async fn fetch(&self) -> Result<StatsSnapshot, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode(&body)
    }
}

/// Decode a stats document, turning an `error` field into [`FetchError::Server`].
///
/// The `error` check runs before the typed decode so an error-only payload
/// such as `{"error": "db down"}` is reported as a server error rather than
/// as missing fields.
pub fn decode(body: &[u8]) -> Result<StatsSnapshot, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    if let Some(err) = value.get("error").filter(|v| !v.is_null()) {
        let message = err
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| err.to_string());
        return Err(FetchError::Server(message));
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve `app` on an ephemeral localhost port; returns the base URL.
    pub(crate) async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub(crate) fn stats_body(total_requests: u64) -> serde_json::Value {
        json!({
            "total_requests": total_requests,
            "total_bytes_in": 2048,
            "total_bytes_out": 8192,
            "active_clients": 2,
            "recent_requests": [],
            "client_stats": []
        })
    }

    fn client(url: String) -> StatsClient {
        StatsClient::new(url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn decode_plain_document() {
        let body = stats_body(7).to_string();
        let snap = decode(body.as_bytes()).unwrap();
        assert_eq!(snap.total_requests, 7);
        assert_eq!(snap.active_clients, 2);
    }

    #[test]
    fn decode_error_field() {
        let err = decode(br#"{"error": "db down"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Server(ref m) if m == "db down"));
        assert_eq!(err.kind(), "server");
    }

    #[test]
    fn decode_error_field_on_full_document() {
        let mut body = stats_body(1);
        body["error"] = json!({"code": 500});
        let err = decode(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, FetchError::Server(ref m) if m.contains("500")));
    }

    #[test]
    fn decode_null_error_is_ignored() {
        let mut body = stats_body(1);
        body["error"] = serde_json::Value::Null;
        assert!(decode(body.to_string().as_bytes()).is_ok());
    }

    #[test]
    fn decode_garbage() {
        let err = decode(b"<html>proxy</html>").unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn fetch_success() {
        let app = Router::new().route("/stats.json", get(|| async { Json(stats_body(42)) }));
        let base = serve(app).await;

        let snap = client(format!("{base}/stats.json")).fetch().await.unwrap();
        assert_eq!(snap.total_requests, 42);
        assert_eq!(snap.total_bytes_out, 8192);
    }

    #[tokio::test]
    async fn fetch_non_success_status() {
        let app = Router::new().route(
            "/stats.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let base = serve(app).await;

        let err = client(format!("{base}/stats.json")).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn fetch_server_error_field() {
        let app = Router::new().route(
            "/stats.json",
            get(|| async { Json(json!({"error": "db down"})) }),
        );
        let base = serve(app).await;

        let err = client(format!("{base}/stats.json")).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Server(_)));
    }

    #[tokio::test]
    async fn fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/stats.json")).fetch().await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
