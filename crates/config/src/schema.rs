use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `statdash.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashConfig {
    /// Where and how often to fetch the stats document.
    pub poll: PollConfig,
    /// Rolling history settings for the trend graphs.
    pub history: HistoryConfig,
    /// Which sections of the dashboard are shown.
    pub layout: LayoutConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Stats endpoint polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Full URL of the JSON stats document.
    pub endpoint: String,
    /// Time between polls in milliseconds.
    pub interval_ms: u64,
    /// Per-request timeout in milliseconds.  Unset = same as `interval_ms`.
    pub timeout_ms: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            endpoint:    "http://127.0.0.1:3128/stat/stats.json".to_string(),
            interval_ms: 5_000,
            timeout_ms:  None,
        }
    }
}

impl PollConfig {
    /// Poll interval in seconds, the divisor for every counter rate.
    #[must_use]
    pub fn interval_secs(&self) -> f64 {
        self.interval_ms as f64 / 1000.0
    }

    #[must_use]
    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(self.interval_ms)
    }
}

/// Rolling history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Samples kept per metric (60 × 5 s = five minutes).
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 60 }
    }
}

/// Dashboard section toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of each sparkline in logical pixels.
    pub graph_height: f32,
    pub show_recent_requests: bool,
    pub show_client_stats: bool,
    /// Cap on grouped rows in the recent-requests table.  Unset = all.
    pub max_recent_rows: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            graph_height:         60.0,
            show_recent_requests: true,
            show_client_stats:    true,
            max_recent_rows:      None,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Font size in points.
    pub font_size: f32,
    /// Corner radius for cards (pixels).
    pub border_radius: f32,
    /// Inner padding for each card (pixels).
    pub padding: u16,
    /// Gap between cards (pixels).
    pub gap: u16,
    pub light: PaletteConfig,
    pub dark: PaletteConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_size:     14.0,
            border_radius: 8.0,
            padding:       12,
            gap:           12,
            light:         PaletteConfig::light(),
            dark:          PaletteConfig::dark(),
        }
    }
}

/// Hex colours for one scheme.  A palette table must list every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Window background.
    pub background: String,
    /// Card / table background.
    pub surface: String,
    /// Primary text colour.
    pub foreground: String,
    /// Secondary text (labels, min/max).
    pub muted: String,
    /// Graph line and highlights.
    pub accent: String,
    /// Error banner.
    pub error: String,
    /// Rising trend arrow.
    pub up: String,
    /// Falling trend arrow.
    pub down: String,
}

impl PaletteConfig {
    pub fn light() -> Self {
        Self {
            background: "#eff1f5".to_string(), // Catppuccin Latte: base
            surface:    "#e6e9ef".to_string(), // Catppuccin Latte: mantle
            foreground: "#4c4f69".to_string(), // Catppuccin Latte: text
            muted:      "#7c7f93".to_string(), // Catppuccin Latte: overlay2
            accent:     "#1e66f5".to_string(), // Catppuccin Latte: blue
            error:      "#d20f39".to_string(), // Catppuccin Latte: red
            up:         "#40a02b".to_string(), // Catppuccin Latte: green
            down:       "#fe640b".to_string(), // Catppuccin Latte: peach
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#1e1e2e".to_string(), // Catppuccin Mocha: base
            surface:    "#313244".to_string(), // Catppuccin Mocha: surface0
            foreground: "#cdd6f4".to_string(), // Catppuccin Mocha: text
            muted:      "#9399b2".to_string(), // Catppuccin Mocha: overlay2
            accent:     "#89b4fa".to_string(), // Catppuccin Mocha: blue
            error:      "#f38ba8".to_string(), // Catppuccin Mocha: red
            up:         "#a6e3a1".to_string(), // Catppuccin Mocha: green
            down:       "#fab387".to_string(), // Catppuccin Mocha: peach
        }
    }
}
