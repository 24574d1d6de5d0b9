/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:   Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const LIGHT:  Self = Self { r: 0.937, g: 0.945, b: 0.961, a: 1.0 }; // #eff1f5
    pub const TEXT_DARK:  Self = Self { r: 0.298, g: 0.310, b: 0.412, a: 1.0 }; // #4c4f69
    pub const TEXT_LIGHT: Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const BLUE:   Self = Self { r: 0.118, g: 0.400, b: 0.961, a: 1.0 }; // #1e66f5
    pub const RED:    Self = Self { r: 0.824, g: 0.059, b: 0.224, a: 1.0 }; // #d20f39
    pub const GREEN:  Self = Self { r: 0.251, g: 0.627, b: 0.169, a: 1.0 }; // #40a02b
    pub const ORANGE: Self = Self { r: 0.996, g: 0.392, b: 0.043, a: 1.0 }; // #fe640b

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<f32> { u8::from_str_radix(s, 16).ok().map(|b| f32::from(b) / 255.0) };

        let alpha = match hex.len() {
            6 => 1.0,
            8 => byte(&hex[6..8])?,
            _ => return None,
        };

        Some(Self {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: alpha,
        })
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
