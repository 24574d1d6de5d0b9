pub mod colors;
pub mod preference;
pub mod style;
pub mod system;

pub use colors::Color;
pub use preference::{load_preference, save_preference};
pub use style::CardStyle;
pub use system::spawn_scheme_watcher;

use statdash_config::{PaletteConfig, ThemeConfig};
use statdash_core::ColorScheme;

/// Compiled theme for one concrete scheme, derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible; invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub scheme:        ColorScheme,
    pub background:    Color,
    pub surface:       Color,
    pub foreground:    Color,
    pub muted:         Color,
    pub accent:        Color,
    pub error:         Color,
    pub up:            Color,
    pub down:          Color,
    pub font_size:     f32,
    pub border_radius: f32,
    pub padding:       u16,
    pub gap:           u16,
}

impl Theme {
    /// Build the [`Theme`] for `scheme` from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig, scheme: ColorScheme) -> Self {
        let palette: &PaletteConfig = match scheme {
            ColorScheme::Light => &cfg.light,
            ColorScheme::Dark  => &cfg.dark,
        };
        let (bg, fg) = match scheme {
            ColorScheme::Light => (Color::LIGHT, Color::TEXT_DARK),
            ColorScheme::Dark  => (Color::DARK, Color::TEXT_LIGHT),
        };
        let parse = |hex: &str, fallback: Color| Color::from_hex(hex).unwrap_or(fallback);

        let foreground = parse(&palette.foreground, fg);
        Self {
            scheme,
            background:    parse(&palette.background, bg),
            surface:       parse(&palette.surface, bg),
            foreground,
            muted:         parse(&palette.muted, foreground.with_alpha(0.6)),
            accent:        parse(&palette.accent, Color::BLUE),
            error:         parse(&palette.error, Color::RED),
            up:            parse(&palette.up, Color::GREEN),
            down:          parse(&palette.down, Color::ORANGE),
            font_size:     cfg.font_size,
            border_radius: cfg.border_radius,
            padding:       cfg.padding,
            gap:           cfg.gap,
        }
    }

    /// Style shared by every card and table container.
    pub fn card(&self) -> CardStyle {
        CardStyle {
            background:    self.surface,
            foreground:    self.foreground,
            border_radius: self.border_radius,
            padding:       self.padding,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), ColorScheme::Light)
    }
}
