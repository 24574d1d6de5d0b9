use statdash_core::{DashError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Key under which the theme choice is stored.
pub const THEME_KEY: &str = "preferred-theme";

/// A tiny persistent key → value store backed by a TOML table on disk.
///
/// Every [`set`](Self::set) rewrites the whole file; the store only ever holds
/// a handful of user preferences.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path:   PathBuf,
    values: toml::Table,
}

impl PreferenceStore {
    /// Open the store at `path`.  A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => raw.parse::<toml::Table>().unwrap_or_else(|e| {
                warn!("Ignoring corrupt preference file '{}': {e}", path.display());
                toml::Table::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => {
                warn!("Cannot read preference file '{}': {e}", path.display());
                toml::Table::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a string value.  Non-string entries are treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(toml::Value::as_str)
    }

    /// Store `value` under `key` and persist immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string(&self.values)
            .map_err(|e| DashError::Preference(format!("serialize: {e}")))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            DashError::Preference(format!("cannot write '{}': {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.toml"));
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let mut store = PreferenceStore::open(&path);
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY), Some("dark"));

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY), Some("dark"));
    }

    #[test]
    fn overwrite_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = PreferenceStore::open(&path);
        store.set("other", "kept").unwrap();
        store.set(THEME_KEY, "light").unwrap();
        store.set(THEME_KEY, "auto").unwrap();

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY), Some("auto"));
        assert_eq!(reopened.get("other"), Some("kept"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(store.get(THEME_KEY), None);
    }
}
