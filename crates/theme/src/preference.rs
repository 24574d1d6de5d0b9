use statdash_config::{PreferenceStore, THEME_KEY};
use statdash_core::{Result, ThemePreference};
use tracing::warn;

/// Read the stored theme choice.  Missing or unrecognised values mean `Auto`.
pub fn load_preference(store: &PreferenceStore) -> ThemePreference {
    match store.get(THEME_KEY) {
        None => ThemePreference::Auto,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring stored theme preference: {e}");
            ThemePreference::Auto
        }),
    }
}

/// Persist the theme choice.
pub fn save_preference(store: &mut PreferenceStore, pref: ThemePreference) -> Result<()> {
    store.set(THEME_KEY, pref.as_str())
}
