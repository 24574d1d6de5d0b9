use crate::colors::Color;

/// Visual settings for a dashboard card (summary tile, graph, table).
#[derive(Debug, Clone, Copy)]
pub struct CardStyle {
    pub background:    Color,
    pub foreground:    Color,
    pub border_radius: f32,
    pub padding:       u16,
}

impl CardStyle {
    /// Iced container style for this card.
    pub fn container(self) -> iced::widget::container::Style {
        iced::widget::container::Style {
            background: Some(iced::Background::Color(self.background.to_iced())),
            text_color: Some(self.foreground.to_iced()),
            border: iced::Border {
                radius: self.border_radius.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
