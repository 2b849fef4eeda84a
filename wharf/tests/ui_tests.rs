//! UI tests using iced_test Simulator.
//!
//! These tests verify the UI behavior without a live deployment behind the
//! API.

use iced_test::simulator;

use wharf::app::AppTheme;
use wharf::message::{AgentId, Message};
use wharf::mock;
use wharf::view::dashboard::{DashboardState, ReadmeState, dashboard_view};
use wharf::view::markdown;
use wharf::view::port_forward::PortForwardState;
use wharf::view::usage_chart::UsageChartState;

use std::collections::HashMap;

use wharf_api::UsageInterval;

/// Bundles the state the dashboard view needs.
struct Fixture {
    dashboard: DashboardState,
    usage: UsageChartState,
    ports: HashMap<AgentId, PortForwardState>,
    readme: ReadmeState,
    banner: Vec<markdown::Inline>,
    renderer: markdown::Renderer,
}

impl Fixture {
    fn empty() -> Self {
        Self {
            dashboard: DashboardState::default(),
            usage: UsageChartState::new(Some(40)),
            ports: HashMap::new(),
            readme: ReadmeState::default(),
            banner: Vec::new(),
            renderer: markdown::Renderer::new(markdown::GFM),
        }
    }

    /// A fixture with the mock workspace and per-agent port state.
    fn with_workspace() -> Self {
        let mut fixture = Self::empty();
        let workspace = mock::workspace::workspace();

        for agent in &workspace.agents {
            fixture.ports.insert(
                AgentId::from(agent),
                PortForwardState::new(AgentId::from(agent), agent.name.clone(), agent.status),
            );
        }

        fixture.dashboard.workspace = Some(workspace);
        fixture.dashboard.connected = true;
        fixture
    }

    fn view(&self) -> iced::Element<'_, Message> {
        dashboard_view(
            &self.dashboard,
            &self.usage,
            &self.ports,
            &self.readme,
            &self.banner,
            &self.renderer,
            AppTheme::Dark,
            0,
        )
    }

    fn agent_state(&mut self, name: &str) -> &mut PortForwardState {
        let id = AgentId::new(format!("agent-{}", name));
        self.ports.get_mut(&id).expect("agent state")
    }
}

/// Test that the dashboard renders correctly with no data.
#[test]
fn test_dashboard_empty() {
    let fixture = Fixture::empty();
    let mut ui = simulator(fixture.view());

    // Should show the waiting message and the disconnected status
    assert!(ui.find("Waiting for deployment data...").is_ok());
    assert!(ui.find("Disconnected").is_ok());
    assert!(ui.find("Loading usage data...").is_ok());
    assert!(ui.find("Loading README...").is_ok());
}

/// Test that the dashboard shows agents when populated.
#[test]
fn test_dashboard_with_workspace() {
    let fixture = Fixture::with_workspace();
    let mut ui = simulator(fixture.view());

    // Should show both agent names and the connection status
    assert!(ui.find("main").is_ok());
    assert!(ui.find("gpu").is_ok());
    assert!(ui.find("Connected").is_ok());
    assert!(ui.find("alice/dev").is_ok());
}

/// Test that the Ports control is disabled until the first fetch lands.
#[test]
fn test_ports_control_disabled_before_first_fetch() {
    let fixture = Fixture::with_workspace();
    let mut ui = simulator(fixture.view());

    let _ = ui.click("Ports");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        !messages
            .iter()
            .any(|m| matches!(m, Message::TogglePortsPanel(_)))
    );
}

/// Test that the Ports control toggles once data has arrived.
#[test]
fn test_ports_control_toggles_after_data() {
    let mut fixture = Fixture::with_workspace();
    fixture
        .agent_state("main")
        .set_ports(mock::ports::web_stack(), 0);

    let mut ui = simulator(fixture.view());

    let _ = ui.click("Ports");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::TogglePortsPanel(_)))
    );
}

/// Test the expanded panel lists ports with process-name labels.
#[test]
fn test_ports_panel_lists_ports() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(mock::ports::web_stack(), 0);
        state.expanded = true;
    }

    let mut ui = simulator(fixture.view());

    assert!(
        ui.find("The forwarded ports are exclusively accessible to you.")
            .is_ok()
    );
    // Labeled by process name where known
    assert!(ui.find("node").is_ok());
    assert!(ui.find("postgres").is_ok());
    // Unnamed process falls back to the numeric port
    assert!(ui.find("8080").is_ok());
}

/// Test the empty-ports message.
#[test]
fn test_ports_panel_empty_message() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(Vec::new(), 0);
        state.expanded = true;
    }

    let mut ui = simulator(fixture.view());

    assert!(ui.find("No open ports were detected.").is_ok());
}

/// Test clicking a forwarded port entry.
#[test]
fn test_port_link_click() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(mock::ports::web_stack(), 0);
        state.expanded = true;
    }

    let mut ui = simulator(fixture.view());

    let _ = ui.click("node");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::OpenForwardUrl { port: 3000, .. }))
    );
}

/// Test the manual port form is present with its placeholder.
#[test]
fn test_manual_port_form_rendered() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(Vec::new(), 0);
        state.expanded = true;
    }

    let mut ui = simulator(fixture.view());

    assert!(ui.find("Forward port").is_ok());
    assert!(ui.find("Type a port number...").is_ok());
}

/// Test a validation error is surfaced next to the form.
#[test]
fn test_manual_port_form_validation_error_shown() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(Vec::new(), 0);
        state.expanded = true;
        state.set_input("70000".to_string());
        assert_eq!(state.submit(), None);
    }

    let mut ui = simulator(fixture.view());

    assert!(ui.find("Port must be between 0 and 65535").is_ok());
}

/// Test a failed refresh keeps the snapshot and surfaces staleness.
#[test]
fn test_stale_snapshot_caption() {
    let mut fixture = Fixture::with_workspace();
    {
        let state = fixture.agent_state("main");
        state.set_ports(mock::ports::web_stack(), 0);
        state.expanded = true;
        state.set_error("connection refused".to_string());
    }

    let mut ui = simulator(fixture.view());

    // Previous snapshot still listed
    assert!(ui.find("node").is_ok());
    // Staleness and failure surfaced
    assert!(ui.find("Updated just now").is_ok());
    assert!(ui.find("Last refresh failed: connection refused").is_ok());
}

/// Test switching the usage granularity.
#[test]
fn test_interval_button_click() {
    let fixture = Fixture::with_workspace();
    let mut ui = simulator(fixture.view());

    let _ = ui.click("Week");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::SelectInterval(UsageInterval::Week)))
    );
}

/// Test the chart renders once samples arrive.
#[test]
fn test_usage_chart_replaces_loading_text() {
    let mut fixture = Fixture::with_workspace();
    fixture
        .usage
        .set_samples(UsageInterval::Day, mock::usage::daily(14));

    let mut ui = simulator(fixture.view());

    assert!(ui.find("Loading usage data...").is_err());
}

/// Test a disconnected agent still renders with its status text.
#[test]
fn test_disconnected_agent_status_text() {
    let fixture = Fixture::with_workspace();
    let mut ui = simulator(fixture.view());

    assert!(ui.find("disconnected").is_ok());
}
