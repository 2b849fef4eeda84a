use wharf_api::{ListeningPort, UsageInterval, UsageSample, Workspace};

/// Messages for the Wharf application.
#[derive(Debug, Clone)]
pub enum Message {
    /// Workspace snapshot received from the deployment.
    WorkspaceLoaded(Workspace),

    /// Workspace fetch failed.
    WorkspaceFetchFailed(String),

    /// Active-user series received.
    UsageLoaded {
        interval: UsageInterval,
        samples: Vec<UsageSample>,
    },

    /// Active-user fetch failed.
    UsageFetchFailed(String),

    /// Template README Markdown received.
    ReadmeLoaded(String),

    /// Template README fetch failed.
    ReadmeFetchFailed(String),

    /// Listening ports received for an agent.
    PortsLoaded {
        agent: AgentId,
        ports: Vec<ListeningPort>,
    },

    /// Port listing fetch failed for an agent.
    PortsFetchFailed { agent: AgentId, error: String },

    /// User changed the usage chart granularity.
    SelectInterval(UsageInterval),

    /// User toggled an agent's ports panel.
    TogglePortsPanel(AgentId),

    /// User edited the manual port input of an agent.
    PortInputChanged { agent: AgentId, value: String },

    /// User submitted the manual port form of an agent.
    SubmitPortForm(AgentId),

    /// User clicked a forwarded port entry.
    OpenForwardUrl { agent: AgentId, port: u16 },

    /// User activated a link in rendered Markdown.
    LinkClicked(String),

    /// User toggled between light and dark theme.
    ToggleTheme,

    /// Tick for periodic UI updates (e.g., relative timestamps).
    Tick,
}

/// Unique identifier for a workspace agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&wharf_api::Agent> for AgentId {
    fn from(agent: &wharf_api::Agent) -> Self {
        Self(agent.id.clone())
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
