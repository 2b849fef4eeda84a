//! Status dot widget for agent connectivity.

use iced::widget::{container, row, text};
use iced::{Alignment, Element, Length, Theme};

use wharf_api::AgentStatus;

/// A colored dot indicating agent connectivity.
pub struct StatusDot {
    /// Current status.
    status: AgentStatus,
    /// Size of the dot (diameter).
    size: f32,
    /// Whether to show the status text.
    show_status_text: bool,
}

impl StatusDot {
    /// Create a new status dot.
    pub fn new(status: AgentStatus) -> Self {
        Self {
            status,
            size: 10.0,
            show_status_text: false,
        }
    }

    /// Show the status text (connected/disconnected/...).
    pub fn with_status_text(mut self) -> Self {
        self.show_status_text = true;
        self
    }

    /// Get the color for a status.
    fn color(status: AgentStatus) -> iced::Color {
        match status {
            AgentStatus::Connected => iced::Color::from_rgb(0.2, 0.8, 0.3),
            AgentStatus::Connecting => iced::Color::from_rgb(0.9, 0.7, 0.2),
            AgentStatus::Disconnected => iced::Color::from_rgb(0.9, 0.2, 0.2),
            AgentStatus::Timeout => iced::Color::from_rgb(0.5, 0.5, 0.5),
        }
    }

    /// Render the status dot as an Iced element.
    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        let color = Self::color(self.status);

        let dot = container(text(""))
            .width(Length::Fixed(self.size))
            .height(Length::Fixed(self.size))
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(color)),
                border: iced::Border {
                    color: iced::Color::from_rgb(0.3, 0.3, 0.3),
                    width: 1.0,
                    radius: (self.size / 2.0).into(),
                },
                ..Default::default()
            });

        let mut content = row![dot].spacing(8).align_y(Alignment::Center);

        if self.show_status_text {
            let status_text = text(self.status.as_str())
                .size(10)
                .style(move |_theme: &Theme| text::Style { color: Some(color) });
            content = content.push(status_text);
        }

        content.into()
    }
}
