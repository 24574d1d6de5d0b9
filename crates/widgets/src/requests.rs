use crate::format::{format_bytes, format_clock, NumberLocale};
use iced::{
    widget::{column, container, row, scrollable, text},
    Element, Length,
};
use statdash_core::{Message, RecentRequest, Timestamp};
use statdash_theme::Theme;
use std::collections::HashMap;

/// Identical requests (same method, host, path and status) collapsed into
/// one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestGroup {
    /// Client of the first request seen in the group.
    pub client_ip:   String,
    pub method:      String,
    pub host:        String,
    pub path:        String,
    pub status:      u16,
    pub count:       usize,
    /// Sum of `bytes_in + bytes_out` over the group.
    pub bytes_total: u64,
    /// Most recent timestamp in the group.
    pub timestamp:   Timestamp,
}

impl RequestGroup {
    fn from_request(req: &RecentRequest) -> Self {
        Self {
            client_ip:   req.client_ip.clone(),
            method:      req.method.clone(),
            host:        req.host.clone(),
            path:        req.path.clone(),
            status:      req.status,
            count:       1,
            bytes_total: req.bytes_in.saturating_add(req.bytes_out),
            timestamp:   req.timestamp,
        }
    }

    fn absorb(&mut self, req: &RecentRequest) {
        self.count += 1;
        self.bytes_total = self
            .bytes_total
            .saturating_add(req.bytes_in.saturating_add(req.bytes_out));
        self.timestamp = self.timestamp.max(req.timestamp);
    }
}

/// Collapse identical requests and order the groups newest first.
///
/// Groups with equal timestamps keep the order in which they first appeared.
pub fn group_requests(requests: &[RecentRequest]) -> Vec<RequestGroup> {
    let mut index: HashMap<(&str, &str, &str, u16), usize> = HashMap::with_capacity(requests.len());
    let mut groups: Vec<RequestGroup> = Vec::new();
    for req in requests {
        let key = (req.method.as_str(), req.host.as_str(), req.path.as_str(), req.status);
        match index.get(&key) {
            Some(&i) => groups[i].absorb(req),
            None => {
                index.insert(key, groups.len());
                groups.push(RequestGroup::from_request(req));
            }
        }
    }
    groups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    groups
}

/// One rendered table row, as plain cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub time:   String,
    pub client: String,
    pub method: String,
    pub target: String,
    pub status: String,
    pub count:  String,
    pub bytes:  String,
}

/// Cell text for the grouped table, capped at `limit` rows when set.
///
/// Rows are derived from `requests` alone, so rendering the same snapshot
/// twice yields the same rows.
pub fn request_rows(requests: &[RecentRequest], limit: Option<usize>, locale: &NumberLocale) -> Vec<RequestRow> {
    group_requests(requests)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|g| RequestRow {
            time:   format_clock(g.timestamp),
            client: g.client_ip,
            method: g.method,
            target: format!("{}{}", g.host, g.path),
            status: g.status.to_string(),
            count:  if g.count > 1 { format!("×{}", g.count) } else { String::new() },
            bytes:  format_bytes(g.bytes_total as f64, locale),
        })
        .collect()
}

/// Recent requests table.
#[derive(Debug, Default)]
pub struct RequestsTable;

impl RequestsTable {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        requests: &'a [RecentRequest],
        limit: Option<usize>,
        locale: &NumberLocale,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let size = theme.font_size * 0.9;
        let muted = theme.muted.to_iced();

        let header = row![
            text("Time").size(size).color(muted).width(Length::FillPortion(2)),
            text("Client").size(size).color(muted).width(Length::FillPortion(3)),
            text("Method").size(size).color(muted).width(Length::FillPortion(2)),
            text("Target").size(size).color(muted).width(Length::FillPortion(8)),
            text("Status").size(size).color(muted).width(Length::FillPortion(2)),
            text("").size(size).width(Length::FillPortion(1)),
            text("Bytes").size(size).color(muted).width(Length::FillPortion(3)),
        ]
        .spacing(8);

        let rows = request_rows(requests, limit, locale);
        let mut body = column![].spacing(4);
        if rows.is_empty() {
            body = body.push(text("No recent requests").size(size).color(muted));
        }
        for r in rows {
            let status_color = status_color(&r.status, theme);
            body = body.push(
                row![
                    text(r.time).size(size).width(Length::FillPortion(2)),
                    text(r.client).size(size).width(Length::FillPortion(3)),
                    text(r.method).size(size).width(Length::FillPortion(2)),
                    text(r.target).size(size).width(Length::FillPortion(8)),
                    text(r.status).size(size).color(status_color).width(Length::FillPortion(2)),
                    text(r.count).size(size).color(muted).width(Length::FillPortion(1)),
                    text(r.bytes).size(size).width(Length::FillPortion(3)),
                ]
                .spacing(8),
            );
        }

        let style = theme.card();
        container(
            column![
                text("Recent requests").size(theme.font_size),
                header,
                scrollable(body).height(Length::Fill),
            ]
            .spacing(8),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(style.padding)
        .style(move |_: &iced::Theme| style.container())
        .into()
    }
}

fn status_color(status: &str, theme: &Theme) -> iced::Color {
    match status.as_bytes().first() {
        Some(b'4' | b'5') => theme.error.to_iced(),
        _ => theme.foreground.to_iced(),
    }
}
