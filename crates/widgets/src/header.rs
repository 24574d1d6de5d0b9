use crate::format::{format_clock, format_uptime};
use chrono::{DateTime, Local};
use iced::{
    widget::{column, pick_list, row, text, Space},
    Alignment, Element, Length,
};
use statdash_core::{Message, StatsSnapshot, ThemePreference, Timestamp};
use statdash_theme::Theme;

/// Title bar: server identity, last successful update and the theme picker.
#[derive(Debug, Default)]
pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        snapshot: Option<&'a StatsSnapshot>,
        last_update: Option<Timestamp>,
        now: DateTime<Local>,
        preference: ThemePreference,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let muted = theme.muted.to_iced();
        let small = theme.font_size * 0.85;

        let mut info = column![text("Proxy statistics").size(theme.font_size * 1.4)].spacing(2);
        if let Some(build) = snapshot.and_then(build_line) {
            info = info.push(text(build).size(small).color(muted));
        }

        let mut status = column![text(last_update_line(last_update)).size(small).color(muted)]
            .spacing(2)
            .align_x(Alignment::End);
        if let Some(uptime) = snapshot.and_then(|s| uptime_line(s.start_time?, now)) {
            status = status.push(text(uptime).size(small).color(muted));
        }

        row![
            info,
            Space::new().width(Length::Fill),
            status,
            pick_list(&ThemePreference::ALL[..], Some(preference), Message::ThemeSelected)
                .text_size(small),
        ]
        .spacing(f32::from(theme.gap))
        .align_y(Alignment::Center)
        .into()
    }
}

/// `"v1.4.2 (built 2024-05-01)"`; `None` when the server sends neither.
pub fn build_line(snapshot: &StatsSnapshot) -> Option<String> {
    match (snapshot.version.as_deref(), snapshot.build_date.as_deref()) {
        (Some(v), Some(d)) => Some(format!("v{} (built {d})", v.trim_start_matches('v'))),
        (Some(v), None) => Some(format!("v{}", v.trim_start_matches('v'))),
        (None, Some(d)) => Some(format!("built {d}")),
        (None, None) => None,
    }
}

pub fn last_update_line(last_update: Option<Timestamp>) -> String {
    match last_update {
        Some(ts) => format!("Last update: {}", format_clock(ts)),
        None => "Waiting for data…".to_string(),
    }
}

/// Server uptime relative to `now`; `None` when the start time is in the future.
pub fn uptime_line(start: Timestamp, now: DateTime<Local>) -> Option<String> {
    let secs = now.timestamp_millis().checked_sub(start.as_millis())? / 1000;
    u64::try_from(secs).ok().map(|s| format!("Up {}", format_uptime(s)))
}
