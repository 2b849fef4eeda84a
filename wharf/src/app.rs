//! Wharf Iced application.

use std::collections::HashMap;
use std::path::PathBuf;

use iced::{Element, Subscription, Task, Theme};

use wharf_api::{DashboardConfig, Workspace, forward_url};

use crate::message::{AgentId, Message};
use crate::subscription::{
    PortPoll, UsagePoll, WorkspacePoll, demo_subscription, port_poll_subscription,
    tick_subscription, usage_subscription, workspace_subscription,
};
use crate::view::dashboard::{DashboardState, ReadmeState, dashboard_view};
use crate::view::formatting::now_ms;
use crate::view::markdown;
use crate::view::port_forward::PortForwardState;
use crate::view::usage_chart::UsageChartState;

/// Color scheme of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTheme {
    Light,
    #[default]
    Dark,
}

impl AppTheme {
    /// The corresponding Iced theme.
    pub fn to_theme(self) -> Theme {
        match self {
            AppTheme::Light => Theme::Light,
            AppTheme::Dark => Theme::Dark,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// Loaded from the platform config file.
    File(PathBuf),
    /// Built-in demo configuration; the reason the file was not used.
    DemoFallback(&'static str),
}

/// Load the dashboard configuration from the platform config directory.
///
/// A missing file falls back to the built-in demo configuration so a first
/// launch shows populated views; a file that exists but fails to parse is an
/// error.
pub fn load_dashboard_config() -> wharf_api::Result<(DashboardConfig, ConfigSource)> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok((
            demo_config(),
            ConfigSource::DemoFallback("no platform config directory"),
        ));
    };

    let path = config_dir.join("wharf").join("config.json5");
    if !path.exists() {
        return Ok((
            demo_config(),
            ConfigSource::DemoFallback("config file not found"),
        ));
    }

    let config = wharf_api::load_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

fn demo_config() -> DashboardConfig {
    DashboardConfig {
        demo: true,
        user_limit: 40,
        banner: "Demo deployment - data is generated locally. See the \
                 [project page](https://example.com/wharf) for setup."
            .to_string(),
        ..DashboardConfig::default()
    }
}

/// The main Wharf application.
pub struct Wharf {
    /// Dashboard configuration.
    config: DashboardConfig,
    /// Active color scheme.
    theme: AppTheme,
    /// Workspace snapshot and connection state.
    dashboard: DashboardState,
    /// Active-user chart state.
    usage: UsageChartState,
    /// Template README state.
    readme: ReadmeState,
    /// Deployment banner, parsed once from the config (inline subset).
    banner: Vec<markdown::Inline>,
    /// Markdown renderer (syntax sets + enabled extensions).
    markdown: markdown::Renderer,
    /// Per-agent port-forwarding state.
    ports: HashMap<AgentId, PortForwardState>,
    /// Current time (Unix epoch ms), advanced by the tick subscription.
    now_ms: i64,
}

impl Wharf {
    /// Boot the Wharf application (called by iced::application).
    pub fn boot(config: DashboardConfig) -> (Self, Task<Message>) {
        let usage = UsageChartState::new(config.user_limit());
        let banner = markdown::parse_inline_markdown(&config.banner);

        let app = Self {
            config,
            theme: AppTheme::default(),
            dashboard: DashboardState::default(),
            usage,
            readme: ReadmeState::default(),
            banner,
            markdown: markdown::Renderer::new(markdown::GFM),
            ports: HashMap::new(),
            now_ms: now_ms(),
        };

        (app, Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        match &self.dashboard.workspace {
            Some(workspace) => format!("Wharf - {}/{}", workspace.owner, workspace.name),
            None => "Wharf".to_string(),
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WorkspaceLoaded(workspace) => {
                self.handle_workspace(workspace);
            }

            Message::WorkspaceFetchFailed(error) => {
                tracing::warn!(error = %error, "Deployment unreachable");
                self.dashboard.connected = false;
                self.dashboard.last_error = Some(error);
            }

            Message::UsageLoaded { interval, samples } => {
                self.usage.set_samples(interval, samples);
            }

            Message::UsageFetchFailed(error) => {
                tracing::warn!(error = %error, "Active-user fetch failed");
            }

            Message::ReadmeLoaded(source) => {
                self.handle_readme(&source);
            }

            Message::ReadmeFetchFailed(error) => {
                self.readme.error = Some(error);
            }

            Message::PortsLoaded { agent, ports } => {
                if let Some(state) = self.ports.get_mut(&agent) {
                    state.set_ports(ports, self.now_ms);
                }
            }

            Message::PortsFetchFailed { agent, error } => {
                if let Some(state) = self.ports.get_mut(&agent) {
                    state.set_error(error);
                }
            }

            Message::SelectInterval(interval) => {
                self.usage.set_interval(interval);
            }

            Message::TogglePortsPanel(agent) => {
                if let Some(state) = self.ports.get_mut(&agent) {
                    state.toggle();
                }
            }

            Message::PortInputChanged { agent, value } => {
                if let Some(state) = self.ports.get_mut(&agent) {
                    state.set_input(value);
                }
            }

            Message::SubmitPortForm(agent) => {
                let port = self.ports.get_mut(&agent).and_then(|state| state.submit());
                if let Some(port) = port {
                    self.open_forward(&agent, port);
                }
            }

            Message::OpenForwardUrl { agent, port } => {
                self.open_forward(&agent, port);
            }

            Message::LinkClicked(url) => {
                open_external(&url);
            }

            Message::ToggleTheme => {
                self.theme = self.theme.toggled();
            }

            Message::Tick => {
                self.now_ms = now_ms();
            }
        }

        Task::none()
    }

    /// Create subscriptions for polling and periodic updates.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.config.demo {
            return Subscription::batch([demo_subscription(), tick_subscription()]);
        }

        let (owner, name) = self.config.workspace_parts();

        let mut subscriptions = vec![
            workspace_subscription(WorkspacePoll {
                api: self.config.api.clone(),
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            usage_subscription(UsagePoll {
                api: self.config.api.clone(),
                interval: self.usage.interval(),
            }),
            tick_subscription(),
        ];

        for spec in self.port_polls() {
            subscriptions.push(port_poll_subscription(spec));
        }

        Subscription::batch(subscriptions)
    }

    /// Port-poll specs for the agents that are currently connected.
    ///
    /// A poll stream exists only while its spec is returned from here:
    /// when an agent leaves the connected state the runtime drops the
    /// stream, so no fetch runs for it until it reconnects.
    pub fn port_polls(&self) -> Vec<PortPoll> {
        let Some(workspace) = &self.dashboard.workspace else {
            return Vec::new();
        };

        workspace
            .agents
            .iter()
            .filter(|agent| agent.status.is_connected())
            .map(|agent| PortPoll {
                api: self.config.api.clone(),
                agent: AgentId::from(agent),
            })
            .collect()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        dashboard_view(
            &self.dashboard,
            &self.usage,
            &self.ports,
            &self.readme,
            &self.banner,
            &self.markdown,
            self.theme,
            self.now_ms,
        )
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        self.theme.to_theme()
    }

    /// Apply a new workspace snapshot and reconcile per-agent state.
    fn handle_workspace(&mut self, workspace: Workspace) {
        self.dashboard.connected = true;
        self.dashboard.last_error = None;

        for agent in &workspace.agents {
            let id = AgentId::from(agent);
            match self.ports.get_mut(&id) {
                Some(state) => {
                    if state.status != agent.status {
                        tracing::info!(
                            agent = %agent.name,
                            status = %agent.status,
                            "Agent status changed"
                        );
                    }
                    state.status = agent.status;
                    state.agent_name = agent.name.clone();
                }
                None => {
                    self.ports.insert(
                        id.clone(),
                        PortForwardState::new(id, agent.name.clone(), agent.status),
                    );
                }
            }
        }

        // Drop state for agents no longer in the snapshot
        self.ports
            .retain(|id, _| workspace.agents.iter().any(|a| a.id == id.as_str()));

        self.dashboard.workspace = Some(workspace);
    }

    /// Apply a received README, re-parsing only when the content changed.
    fn handle_readme(&mut self, source: &str) {
        self.readme.error = None;

        match &mut self.readme.document {
            Some(document) => {
                self.markdown.update(document, source);
            }
            None => {
                self.readme.document = Some(self.markdown.parse(source));
            }
        }
    }

    /// Build the forwarding URL for a port on an agent and open it.
    fn open_forward(&self, agent_id: &AgentId, port: u16) {
        let Some(workspace) = &self.dashboard.workspace else {
            tracing::warn!("No workspace snapshot; cannot build forwarding URL");
            return;
        };

        let Some(agent) = workspace
            .agents
            .iter()
            .find(|a| a.id == agent_id.as_str())
        else {
            tracing::warn!(agent = %agent_id, "Unknown agent");
            return;
        };

        let url = forward_url(
            &self.config.proxy_host,
            port,
            &agent.name,
            &workspace.name,
            &workspace.owner,
        );

        tracing::info!(url = %url, "Opening forwarding URL");
        open_external(&url);
    }
}

/// Open a URL in the system browser.
fn open_external(url: &str) {
    if let Err(e) = opener::open(url) {
        tracing::error!(error = %e, url = %url, "Failed to open browser");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wharf_api::{Agent, AgentStatus};

    fn workspace(statuses: &[(&str, AgentStatus)]) -> Workspace {
        Workspace {
            name: "dev".to_string(),
            owner: "alice".to_string(),
            agents: statuses
                .iter()
                .map(|(name, status)| Agent {
                    id: format!("agent-{}", name),
                    name: name.to_string(),
                    status: *status,
                })
                .collect(),
        }
    }

    fn booted() -> Wharf {
        Wharf::boot(DashboardConfig::default()).0
    }

    #[test]
    fn test_no_polls_without_workspace() {
        let app = booted();
        assert!(app.port_polls().is_empty());
    }

    #[test]
    fn test_polls_only_connected_agents() {
        let mut app = booted();
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[
            ("main", AgentStatus::Connected),
            ("gpu", AgentStatus::Disconnected),
        ])));

        let polls = app.port_polls();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].agent.as_str(), "agent-main");
    }

    #[test]
    fn test_polling_suspends_on_disconnect() {
        let mut app = booted();
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Connected,
        )])));
        assert_eq!(app.port_polls().len(), 1);

        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Timeout,
        )])));
        assert!(app.port_polls().is_empty());

        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Connected,
        )])));
        assert_eq!(app.port_polls().len(), 1);
    }

    #[test]
    fn test_snapshot_reconciles_agent_state() {
        let mut app = booted();
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[
            ("main", AgentStatus::Connected),
            ("gpu", AgentStatus::Connected),
        ])));
        assert_eq!(app.ports.len(), 2);

        // gpu disappears from the snapshot
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Connected,
        )])));
        assert_eq!(app.ports.len(), 1);
        assert!(app.ports.contains_key(&AgentId::new("agent-main")));
    }

    #[test]
    fn test_ports_survive_failed_poll() {
        let mut app = booted();
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Connected,
        )])));

        let agent = AgentId::new("agent-main");
        let _ = app.update(Message::PortsLoaded {
            agent: agent.clone(),
            ports: vec![wharf_api::ListeningPort::new(3000, "node")],
        });
        let _ = app.update(Message::PortsFetchFailed {
            agent: agent.clone(),
            error: "boom".to_string(),
        });

        let state = app.ports.get(&agent).unwrap();
        assert!(state.is_ready());
        assert_eq!(state.ports.as_ref().unwrap().len(), 1);
        assert_eq!(state.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_invalid_port_submission_sets_error() {
        let mut app = booted();
        let _ = app.update(Message::WorkspaceLoaded(workspace(&[(
            "main",
            AgentStatus::Connected,
        )])));

        let agent = AgentId::new("agent-main");
        let _ = app.update(Message::PortInputChanged {
            agent: agent.clone(),
            value: "70000".to_string(),
        });
        let _ = app.update(Message::SubmitPortForm(agent.clone()));

        let state = app.ports.get(&agent).unwrap();
        assert!(state.input_error.is_some());
    }

    #[test]
    fn test_readme_reparse_only_on_change() {
        let mut app = booted();

        let _ = app.update(Message::ReadmeLoaded("# One".to_string()));
        let first = app.readme.document.clone().unwrap();

        let _ = app.update(Message::ReadmeLoaded("# One".to_string()));
        assert_eq!(app.readme.document.as_ref(), Some(&first));

        let _ = app.update(Message::ReadmeLoaded("# Two".to_string()));
        assert_ne!(app.readme.document.as_ref(), Some(&first));
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = booted();
        assert_eq!(app.theme, AppTheme::Dark);

        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme, AppTheme::Light);

        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme, AppTheme::Dark);
    }
}
