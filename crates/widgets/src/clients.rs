use crate::format::{format_bytes, format_clock, NumberLocale};
use iced::{
    widget::{column, container, row, scrollable, text},
    Element, Length,
};
use statdash_core::{ClientStat, Message};
use statdash_theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRow {
    pub ip:        String,
    pub requests:  String,
    pub bytes_in:  String,
    pub bytes_out: String,
    pub total:     String,
    pub last_seen: String,
}

/// Cell text for the per-client table, in the order the server sent them.
pub fn client_rows(clients: &[ClientStat], locale: &NumberLocale) -> Vec<ClientRow> {
    clients
        .iter()
        .map(|c| {
            // Older servers omit `bytes_total`.
            let total = if c.bytes_total > 0 {
                c.bytes_total
            } else {
                c.bytes_in.saturating_add(c.bytes_out)
            };
            ClientRow {
                ip:        c.ip.clone(),
                requests:  locale.format_count(c.requests),
                bytes_in:  format_bytes(c.bytes_in as f64, locale),
                bytes_out: format_bytes(c.bytes_out as f64, locale),
                total:     format_bytes(total as f64, locale),
                last_seen: format_clock(c.last_seen),
            }
        })
        .collect()
}

/// Per-client statistics table.
#[derive(Debug, Default)]
pub struct ClientsTable;

impl ClientsTable {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, clients: &'a [ClientStat], locale: &NumberLocale, theme: &'a Theme) -> Element<'a, Message> {
        let size = theme.font_size * 0.9;
        let muted = theme.muted.to_iced();

        let header = row![
            text("Client").size(size).color(muted).width(Length::FillPortion(4)),
            text("Requests").size(size).color(muted).width(Length::FillPortion(2)),
            text("In").size(size).color(muted).width(Length::FillPortion(3)),
            text("Out").size(size).color(muted).width(Length::FillPortion(3)),
            text("Total").size(size).color(muted).width(Length::FillPortion(3)),
            text("Last seen").size(size).color(muted).width(Length::FillPortion(2)),
        ]
        .spacing(8);

        let mut body = column![].spacing(4);
        let rows = client_rows(clients, locale);
        if rows.is_empty() {
            body = body.push(text("No clients").size(size).color(muted));
        }
        for r in rows {
            body = body.push(
                row![
                    text(r.ip).size(size).width(Length::FillPortion(4)),
                    text(r.requests).size(size).width(Length::FillPortion(2)),
                    text(r.bytes_in).size(size).width(Length::FillPortion(3)),
                    text(r.bytes_out).size(size).width(Length::FillPortion(3)),
                    text(r.total).size(size).width(Length::FillPortion(3)),
                    text(r.last_seen).size(size).color(muted).width(Length::FillPortion(2)),
                ]
                .spacing(8),
            );
        }

        let style = theme.card();
        container(
            column![
                text("Clients").size(theme.font_size),
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
