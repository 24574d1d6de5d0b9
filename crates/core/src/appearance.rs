use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's persisted theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the desktop's light/dark setting.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    pub const ALL: [Self; 3] = [Self::Auto, Self::Light, Self::Dark];

    /// Stable identifier written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto  => "auto",
            Self::Light => "light",
            Self::Dark  => "dark",
        }
    }

    /// The concrete scheme to paint with, given what the desktop reports.
    #[must_use]
    pub fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            Self::Auto  => system,
            Self::Light => ColorScheme::Light,
            Self::Dark  => ColorScheme::Dark,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Auto  => "Auto",
            Self::Light => "Light",
            Self::Dark  => "Dark",
        };
        f.write_str(label)
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto"  => Ok(Self::Auto),
            "light" => Ok(Self::Light),
            "dark"  => Ok(Self::Dark),
            other   => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// A concrete light/dark scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}
