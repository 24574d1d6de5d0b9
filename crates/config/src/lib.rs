pub mod prefs;
pub mod schema;
pub mod watcher;

pub use prefs::{PreferenceStore, THEME_KEY};
pub use schema::{DashConfig, HistoryConfig, LayoutConfig, PaletteConfig, PollConfig, ThemeConfig};
pub use watcher::ConfigWatcher;

use statdash_core::{DashError, Result};
use std::path::{Path, PathBuf};

/// Shortest poll interval accepted from the config file.
pub const MIN_INTERVAL_MS: u64 = 100;

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: DashConfig =
        toml::from_str(&raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;

    tracing::info!("Configuration loaded from '{}'", path.display());
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("statdash.toml")
}

/// Return the default preference store path, honouring `$XDG_STATE_HOME`.
pub fn default_prefs_path() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state").join("prefs.toml")
}

fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(home_fallback)
        });
    base.join("statdash")
}

impl DashConfig {
    /// Reject values the poller or the metrics engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.poll.endpoint.trim();
        if endpoint.is_empty() {
            return Err(DashError::Config("poll.endpoint must not be empty".into()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(DashError::Config(format!(
                "poll.endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }
        if self.poll.interval_ms < MIN_INTERVAL_MS {
            return Err(DashError::Config(format!(
                "poll.interval_ms must be at least {MIN_INTERVAL_MS}, got {}",
                self.poll.interval_ms
            )));
        }
        if self.poll.timeout_ms == Some(0) {
            return Err(DashError::Config("poll.timeout_ms must be positive".into()));
        }
        if self.history.capacity < 2 {
            return Err(DashError::Config(format!(
                "history.capacity must be at least 2, got {}",
                self.history.capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, DashConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(
            r#"
            [poll]
            endpoint = "http://proxy.lan:8080/stat/stats.json"

            [history]
            capacity = 120
            "#,
        );
        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.poll.endpoint, "http://proxy.lan:8080/stat/stats.json");
        assert_eq!(cfg.poll.interval_ms, 5_000);
        assert_eq!(cfg.history.capacity, 120);
        assert_eq!(cfg.theme, ThemeConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let file = write_config("[poll\nendpoint = ");
        assert!(matches!(load(file.path()), Err(DashError::Config(_))));
    }

    #[test]
    fn rejects_tiny_history() {
        let file = write_config("[history]\ncapacity = 1\n");
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("history.capacity"));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut cfg = DashConfig::default();
        cfg.poll.endpoint = "ftp://proxy/stats.json".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_short_interval() {
        let mut cfg = DashConfig::default();
        cfg.poll.interval_ms = 10;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn timeout_defaults_to_interval() {
        let mut poll = PollConfig::default();
        assert_eq!(poll.effective_timeout_ms(), 5_000);
        poll.timeout_ms = Some(1_500);
        assert_eq!(poll.effective_timeout_ms(), 1_500);
        assert!((poll.interval_secs() - 5.0).abs() < f64::EPSILON);
    }
}
