//! Per-agent port-forwarding control.
//!
//! Shows the agent's listening ports (refreshed by the 5 s poll while the
//! agent is connected) as clickable forwarding links, plus a manual port
//! form. The control is disabled until the first successful fetch lands.

use iced::widget::{Column, button, container, row, text, text_input};
use iced::{Alignment, Element, Length, Theme};

use wharf_api::{AgentStatus, ListeningPort};

use crate::message::{AgentId, Message};
use crate::view::components::StatusDot;
use crate::view::formatting::format_elapsed;
use crate::view::icons::{self, IconSize};
use crate::view::theme::ThemeColors;

/// Validate manual port input.
///
/// The accepted range is 0-65535; anything else is rejected here, before
/// any URL construction happens.
pub fn validate_port_input(input: &str) -> Result<u16, String> {
    let input = input.trim();

    if input.is_empty() {
        return Err("Enter a port number".to_string());
    }

    let value: i64 = input
        .parse()
        .map_err(|_| "Port must be a number".to_string())?;

    if !(0..=65535).contains(&value) {
        return Err("Port must be between 0 and 65535".to_string());
    }

    Ok(value as u16)
}

/// State of one agent's port-forwarding control.
#[derive(Debug, Clone)]
pub struct PortForwardState {
    /// Agent identifier.
    pub agent_id: AgentId,
    /// Agent name, used in forwarding URLs.
    pub agent_name: String,
    /// Current connectivity status.
    pub status: AgentStatus,
    /// Last successfully fetched port list; `None` until the first fetch.
    pub ports: Option<Vec<ListeningPort>>,
    /// Timestamp of the last successful fetch (Unix epoch ms).
    pub last_updated: Option<i64>,
    /// Error of the most recent poll, cleared on success.
    pub last_error: Option<String>,
    /// Whether the ports panel is expanded.
    pub expanded: bool,
    /// Manual port form input.
    pub port_input: String,
    /// Validation error of the manual port form.
    pub input_error: Option<String>,
}

impl PortForwardState {
    /// Create the control state for an agent.
    pub fn new(agent_id: AgentId, agent_name: impl Into<String>, status: AgentStatus) -> Self {
        Self {
            agent_id,
            agent_name: agent_name.into(),
            status,
            ports: None,
            last_updated: None,
            last_error: None,
            expanded: false,
            port_input: String::new(),
            input_error: None,
        }
    }

    /// Apply a successful poll result.
    pub fn set_ports(&mut self, ports: Vec<ListeningPort>, now_ms: i64) {
        self.ports = Some(ports);
        self.last_updated = Some(now_ms);
        self.last_error = None;
    }

    /// Record a failed poll. The previous snapshot stays on screen; the
    /// error shows next to the staleness caption.
    pub fn set_error(&mut self, error: String) {
        self.last_error = Some(error);
    }

    /// Whether the first fetch has landed and the control is interactive.
    pub fn is_ready(&self) -> bool {
        self.ports.is_some()
    }

    /// Toggle the ports panel.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Update the manual port input, clearing any stale validation error.
    pub fn set_input(&mut self, value: String) {
        self.port_input = value;
        self.input_error = None;
    }

    /// Validate and consume the manual port form.
    ///
    /// On success the input is cleared and the port returned; on failure
    /// the validation error is stored for display and nothing else happens.
    pub fn submit(&mut self) -> Option<u16> {
        match validate_port_input(&self.port_input) {
            Ok(port) => {
                self.port_input.clear();
                self.input_error = None;
                Some(port)
            }
            Err(error) => {
                self.input_error = Some(error);
                None
            }
        }
    }
}

/// Render one agent row: status, name, ports control, optional panel.
pub fn agent_row<'a>(
    state: &'a PortForwardState,
    colors: &ThemeColors<'_>,
    now_ms: i64,
) -> Element<'a, Message> {
    let status_dot = StatusDot::new(state.status).with_status_text();
    let name = text(&state.agent_name).size(16);

    let header = row![
        status_dot.view(),
        name,
        iced::widget::space::horizontal(),
        ports_button(state),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut content = Column::new().push(header).spacing(8);

    if state.expanded {
        content = content.push(ports_panel(state, colors, now_ms));
    }

    let row_background = colors.row_background();
    container(content)
        .padding(10)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(row_background)),
            border: iced::Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

/// The "Ports" trigger button. Disabled (no on_press) with a loading marker
/// until the first successful fetch.
fn ports_button(state: &PortForwardState) -> Element<'_, Message> {
    let label = match &state.ports {
        Some(ports) => row![text("Ports").size(14), text(format!("{}", ports.len())).size(12)]
            .spacing(6)
            .align_y(Alignment::Center),
        None => row![text("Ports").size(14), text("\u{2026}").size(12)]
            .spacing(6)
            .align_y(Alignment::Center),
    };

    let trigger = button(label).style(iced::widget::button::secondary);

    let trigger = if state.is_ready() {
        trigger.on_press(Message::TogglePortsPanel(state.agent_id.clone()))
    } else {
        trigger
    };

    trigger.into()
}

/// The expanded ports panel: forwarded links, staleness, manual entry.
fn ports_panel<'a>(
    state: &'a PortForwardState,
    colors: &ThemeColors<'_>,
    now_ms: i64,
) -> Element<'a, Message> {
    let ports = state.ports.as_deref().unwrap_or(&[]);

    let mut panel = Column::new().spacing(8).padding(10);

    panel = panel.push(text("Forwarded ports").size(14));

    let caption = if ports.is_empty() {
        "No open ports were detected."
    } else {
        "The forwarded ports are exclusively accessible to you."
    };
    let muted = colors.text_muted();
    panel = panel.push(
        text(caption)
            .size(12)
            .style(move |_theme: &Theme| text::Style { color: Some(muted) }),
    );

    for port in ports {
        panel = panel.push(port_link(state, port, colors));
    }

    if let Some(updated) = state.last_updated {
        let dimmed = colors.text_dimmed();
        panel = panel.push(
            text(format!("Updated {}", format_elapsed(now_ms - updated)))
                .size(11)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(dimmed),
                }),
        );
    }

    if let Some(error) = &state.last_error {
        let warning = colors.warning();
        panel = panel.push(
            text(format!("Last refresh failed: {}", error))
                .size(11)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(warning),
                }),
        );
    }

    panel = panel.push(iced::widget::rule::horizontal(1));
    panel = panel.push(text("Forward port").size(14));
    panel = panel.push(
        text("Access ports running on the agent:")
            .size(12)
            .style(move |_theme: &Theme| text::Style { color: Some(muted) }),
    );

    let agent_for_input = state.agent_id.clone();
    let input = text_input("Type a port number...", &state.port_input)
        .size(14)
        .on_input(move |value| Message::PortInputChanged {
            agent: agent_for_input.clone(),
            value,
        })
        .on_submit(Message::SubmitPortForm(state.agent_id.clone()));

    let open_button = button(
        row![icons::external_link(IconSize::Small), text("Open").size(13)]
            .spacing(5)
            .align_y(Alignment::Center),
    )
    .on_press(Message::SubmitPortForm(state.agent_id.clone()))
    .style(iced::widget::button::primary);

    panel = panel.push(row![input, open_button].spacing(8).align_y(Alignment::Center));

    if let Some(error) = &state.input_error {
        let danger = colors.danger();
        panel = panel.push(
            text(error.clone())
                .size(12)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(danger),
                }),
        );
    }

    let panel_background = colors.background_weak();
    let border = colors.border_subtle();
    container(panel)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(panel_background)),
            border: iced::Border {
                color: border,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// One forwarded-port entry: icon, label, port number; opens the
/// forwarding URL on press.
fn port_link<'a>(
    state: &'a PortForwardState,
    port: &'a ListeningPort,
    colors: &ThemeColors<'_>,
) -> Element<'a, Message> {
    let muted = colors.text_muted();

    let content = row![
        icons::external_link(IconSize::Small),
        text(port.label()).size(14),
        iced::widget::space::horizontal(),
        text(port.port.to_string())
            .size(13)
            .style(move |_theme: &Theme| text::Style { color: Some(muted) }),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    button(content)
        .on_press(Message::OpenForwardUrl {
            agent: state.agent_id.clone(),
            port: port.port,
        })
        .width(Length::Fill)
        .style(iced::widget::button::text)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_range() {
        assert_eq!(validate_port_input("0"), Ok(0));
        assert_eq!(validate_port_input("8080"), Ok(8080));
        assert_eq!(validate_port_input("65535"), Ok(65535));
        assert_eq!(validate_port_input(" 3000 "), Ok(3000));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate_port_input("-1").is_err());
        assert!(validate_port_input("65536").is_err());
        assert!(validate_port_input("99999999999999999999").is_err());
    }

    #[test]
    fn test_validate_rejects_non_numeric() {
        assert!(validate_port_input("").is_err());
        assert!(validate_port_input("http").is_err());
        assert!(validate_port_input("80a").is_err());
    }

    fn state() -> PortForwardState {
        PortForwardState::new(AgentId::new("a1"), "main", AgentStatus::Connected)
    }

    #[test]
    fn test_submit_rejects_invalid_without_url_construction() {
        let mut state = state();
        state.set_input("70000".to_string());

        assert_eq!(state.submit(), None);
        assert!(state.input_error.is_some());
        // Input stays so the user can correct it
        assert_eq!(state.port_input, "70000");
    }

    #[test]
    fn test_submit_accepts_valid_and_clears_input() {
        let mut state = state();
        state.set_input("8080".to_string());

        assert_eq!(state.submit(), Some(8080));
        assert!(state.input_error.is_none());
        assert!(state.port_input.is_empty());
    }

    #[test]
    fn test_editing_clears_validation_error() {
        let mut state = state();
        state.set_input("bogus".to_string());
        assert_eq!(state.submit(), None);
        assert!(state.input_error.is_some());

        state.set_input("bogus8".to_string());
        assert!(state.input_error.is_none());
    }

    #[test]
    fn test_failed_poll_keeps_previous_snapshot() {
        let mut state = state();
        state.set_ports(vec![ListeningPort::new(3000, "node")], 1_000);

        state.set_error("connection refused".to_string());

        let ports = state.ports.as_ref().unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(state.last_updated, Some(1_000));
        assert_eq!(state.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_not_ready_until_first_fetch() {
        let mut state = state();
        assert!(!state.is_ready());

        state.set_error("timeout".to_string());
        assert!(!state.is_ready());

        state.set_ports(Vec::new(), 2_000);
        assert!(state.is_ready());
    }
}
