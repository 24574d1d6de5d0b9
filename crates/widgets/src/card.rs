use crate::format::{format_byte_rate, format_bytes, format_request_rate, NumberLocale};
use crate::sparkline::Sparkline;
use iced::{
    widget::{canvas, column, container, row, text, Space},
    Alignment, Element, Length,
};
use statdash_core::{Message, StatsSnapshot};
use statdash_metrics::{MetricId, MetricState, Trend};
use statdash_theme::Theme;

/// Summary card for one metric: cumulative total, current rate or value,
/// session min/max and the trend sparkline.
#[derive(Debug)]
pub struct MetricCard {
    id: MetricId,
}

impl MetricCard {
    pub fn new(id: MetricId) -> Self {
        Self { id }
    }

    pub fn view<'a>(
        &'a self,
        snapshot: &'a StatsSnapshot,
        state: &'a MetricState,
        capacity: usize,
        graph_height: f32,
        locale: &NumberLocale,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let muted = theme.muted.to_iced();

        let current = state
            .current()
            .map(|v| format_sample(self.id, v, locale))
            .unwrap_or_else(|| "–".to_string());

        let mut headline = row![text(current).size(theme.font_size * 1.3).color(theme.accent.to_iced())]
            .spacing(6)
            .align_y(Alignment::Center);
        if self.id == MetricId::ActiveClients {
            let (arrow, color) = trend_arrow(state.trend(), theme);
            headline = headline.push(text(arrow).size(theme.font_size * 1.3).color(color));
        }

        let (min, max) = match format_range(self.id, state, locale) {
            Some((min, max)) => (format!("Min: {min}"), format!("Max: {max}")),
            None => ("Min: –".to_string(), "Max: –".to_string()),
        };

        let graph = canvas(Sparkline::new(state.history(), capacity, theme.accent.to_iced()))
            .width(Length::Fill)
            .height(Length::Fixed(graph_height));

        let body = column![
            text(title(self.id)).size(theme.font_size).color(muted),
            text(format_total(self.id, snapshot, locale)).size(theme.font_size * 1.6),
            headline,
            text(scale_label(self.id, state, locale)).size(theme.font_size * 0.75).color(muted),
            graph,
            row![
                text(min).size(theme.font_size * 0.85).color(muted),
                Space::new().width(Length::Fill),
                text(max).size(theme.font_size * 0.85).color(muted),
            ],
        ]
        .spacing(6);

        let style = theme.card();
        container(body)
            .width(Length::Fill)
            .padding(style.padding)
            .style(move |_: &iced::Theme| style.container())
            .into()
    }
}

pub fn title(id: MetricId) -> &'static str {
    match id {
        MetricId::Requests      => "Total requests",
        MetricId::BytesIn       => "Traffic in",
        MetricId::BytesOut      => "Traffic out",
        MetricId::ActiveClients => "Active clients",
    }
}

/// Cumulative value shown as the card's big number.
pub fn format_total(id: MetricId, snapshot: &StatsSnapshot, locale: &NumberLocale) -> String {
    let raw = id.read(snapshot);
    match id {
        MetricId::BytesIn | MetricId::BytesOut => format_bytes(raw as f64, locale),
        MetricId::Requests | MetricId::ActiveClients => locale.format_count(raw),
    }
}

/// A plotted sample in the metric's unit.
pub fn format_sample(id: MetricId, value: f64, locale: &NumberLocale) -> String {
    match id {
        MetricId::Requests => format_request_rate(value, locale),
        MetricId::BytesIn | MetricId::BytesOut => format_byte_rate(value, locale),
        MetricId::ActiveClients => locale.format_fixed(value, 0),
    }
}

/// Formatted `(min, max)`, `None` until the first observation.
pub fn format_range(id: MetricId, state: &MetricState, locale: &NumberLocale) -> Option<(String, String)> {
    state
        .extrema()
        .range()
        .map(|(min, max)| (format_sample(id, min, locale), format_sample(id, max, locale)))
}

/// Value at the top edge of the sparkline. The plot never scales below 1.
pub fn scale_label(id: MetricId, state: &MetricState, locale: &NumberLocale) -> String {
    let top = state.history().peak().unwrap_or(0.0).max(1.0);
    format_sample(id, top, locale)
}

fn trend_arrow(trend: Trend, theme: &Theme) -> (&'static str, iced::Color) {
    match trend {
        Trend::Up     => ("↑", theme.up.to_iced()),
        Trend::Down   => ("↓", theme.down.to_iced()),
        Trend::Stable => ("→", theme.muted.to_iced()),
    }
}
