use iced::{
    widget::{container, text},
    Element, Length,
};
use statdash_core::Message;
use statdash_theme::Theme;

/// Error strip shown above the cards while the last poll failed.
#[derive(Debug, Default)]
pub struct ErrorBanner;

impl ErrorBanner {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, message: &'a str, theme: &'a Theme) -> Element<'a, Message> {
        let error = theme.error;
        let radius = theme.border_radius;

        container(text(message).size(theme.font_size).color(error.to_iced()))
            .width(Length::Fill)
            .padding(theme.padding)
            .style(move |_: &iced::Theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(error.with_alpha(0.12).to_iced())),
                border: iced::Border {
                    color: error.to_iced(),
                    width: 1.0,
                    radius: radius.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
