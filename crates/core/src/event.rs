use crate::appearance::{ColorScheme, ThemePreference};
use crate::state::StatsSnapshot;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Stats poller task     → `StatsReceived`, `FetchFailed`
/// - Config watcher task   → `ConfigReloaded`
/// - Colour-scheme watcher → `ColorSchemeDetected`
/// - Theme picker          → `ThemeSelected`
/// - Timer subscription    → `Tick`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Stats poller ──────────────────────────────────────────────────────────
    /// A well-formed stats document arrived from the proxy.
    StatsReceived(Box<StatsSnapshot>),
    /// The tick failed (transport, status, decode or server-reported error).
    /// Carries the text shown in the error banner.
    FetchFailed(String),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Appearance ────────────────────────────────────────────────────────────
    /// User picked a theme in the header drop-down.
    ThemeSelected(ThemePreference),
    /// The desktop reported its current light/dark preference.
    ColorSchemeDetected(ColorScheme),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// One-second timer tick, keeps the uptime readout current.
    Tick,
}
