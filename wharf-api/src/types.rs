use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sample of the active-user series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSample {
    /// Calendar date of the bucket.
    pub date: NaiveDate,

    /// Number of active users observed in the bucket.
    pub amount: u64,
}

impl UsageSample {
    /// Create a new usage sample.
    pub fn new(date: NaiveDate, amount: u64) -> Self {
        Self { date, amount }
    }
}

/// Time granularity of the active-user series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageInterval {
    /// Daily buckets (default).
    #[default]
    Day,
    /// Weekly buckets.
    Week,
}

impl UsageInterval {
    /// Get the string representation used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageInterval::Day => "day",
            UsageInterval::Week => "week",
        }
    }

    /// Get the dataset label shown on the chart.
    pub fn dataset_label(&self) -> &'static str {
        match self {
            UsageInterval::Day => "Daily Active Users",
            UsageInterval::Week => "Weekly Active Users",
        }
    }

    /// Get all interval options.
    pub fn all() -> &'static [UsageInterval] {
        &[UsageInterval::Day, UsageInterval::Week]
    }
}

impl std::fmt::Display for UsageInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A TCP port an agent process is listening on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningPort {
    /// Port number.
    pub port: u16,

    /// Name of the owning process; may be empty when unknown.
    #[serde(default)]
    pub process_name: String,
}

impl ListeningPort {
    /// Create a new listening port entry.
    pub fn new(port: u16, process_name: impl Into<String>) -> Self {
        Self {
            port,
            process_name: process_name.into(),
        }
    }

    /// Display label: the process name when known, the port number otherwise.
    pub fn label(&self) -> String {
        if self.process_name.is_empty() {
            self.port.to_string()
        } else {
            self.process_name.clone()
        }
    }
}

/// Payload of the agent port-listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListeningPortsResponse {
    pub ports: Vec<ListeningPort>,
}

/// Connectivity status of a workspace agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Connecting,
    Connected,
    Disconnected,
    Timeout,
}

impl AgentStatus {
    /// Whether the agent is reachable for port polling.
    pub fn is_connected(&self) -> bool {
        matches!(self, AgentStatus::Connected)
    }

    /// Get the string representation used in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Connecting => "connecting",
            AgentStatus::Connected => "connected",
            AgentStatus::Disconnected => "disconnected",
            AgentStatus::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A remote workspace agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable agent identifier.
    pub id: String,

    /// Human-readable agent name, used in forwarding URLs.
    pub name: String,

    /// Current connectivity status.
    pub status: AgentStatus,
}

/// A workspace snapshot as reported by the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace name, used in forwarding URLs.
    pub name: String,

    /// Owning username, used in forwarding URLs.
    pub owner: String,

    /// Agents belonging to this workspace.
    #[serde(default)]
    pub agents: Vec<Agent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_usage_sample_roundtrip() {
        let sample = UsageSample::new(date("2024-03-01"), 42);
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("2024-03-01"));

        let back: UsageSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_interval_strings() {
        assert_eq!(UsageInterval::Day.as_str(), "day");
        assert_eq!(UsageInterval::Week.as_str(), "week");
        assert_eq!(UsageInterval::Day.dataset_label(), "Daily Active Users");
        assert_eq!(UsageInterval::Week.dataset_label(), "Weekly Active Users");
    }

    #[test]
    fn test_port_label_prefers_process_name() {
        assert_eq!(ListeningPort::new(22, "sshd").label(), "sshd");
        assert_eq!(ListeningPort::new(8080, "").label(), "8080");
    }

    #[test]
    fn test_agent_status_decoding() {
        let agent: Agent =
            serde_json::from_str(r#"{"id":"a1","name":"main","status":"connected"}"#).unwrap();
        assert_eq!(agent.status, AgentStatus::Connected);
        assert!(agent.status.is_connected());

        let agent: Agent =
            serde_json::from_str(r#"{"id":"a1","name":"main","status":"timeout"}"#).unwrap();
        assert!(!agent.status.is_connected());
    }

    #[test]
    fn test_listening_port_default_process_name() {
        let port: ListeningPort = serde_json::from_str(r#"{"port":3000}"#).unwrap();
        assert_eq!(port.process_name, "");
        assert_eq!(port.label(), "3000");
    }
}
