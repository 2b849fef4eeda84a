//! Mock data generators for testing and demo mode.
//!
//! Provides functions to generate realistic dashboard data without a live
//! deployment behind the API.

use chrono::{Duration, Utc};

use wharf_api::{Agent, AgentStatus, ListeningPort, UsageSample, Workspace};

/// Mock active-user series.
pub mod usage {
    use super::*;

    /// Generate a daily active-user series ending today.
    ///
    /// The shape is a gentle weekly rhythm (weekend dips) so the chart has
    /// something recognizable to draw.
    pub fn daily(days: usize) -> Vec<UsageSample> {
        let today = Utc::now().date_naive();

        (0..days)
            .map(|i| {
                let date = today - Duration::days((days - 1 - i) as i64);
                let weekday = chrono::Datelike::weekday(&date).num_days_from_monday();
                let base = 18 + (i as u64 / 4);
                let amount = if weekday >= 5 { base / 3 } else { base };
                UsageSample::new(date, amount)
            })
            .collect()
    }

    /// Generate a weekly active-user series ending this week.
    pub fn weekly(weeks: usize) -> Vec<UsageSample> {
        let today = Utc::now().date_naive();

        (0..weeks)
            .map(|i| {
                let date = today - Duration::weeks((weeks - 1 - i) as i64);
                UsageSample::new(date, 20 + 2 * i as u64)
            })
            .collect()
    }
}

/// Mock workspace and agents.
pub mod workspace {
    use super::*;

    /// Generate a workspace with one connected and one disconnected agent.
    pub fn workspace() -> Workspace {
        Workspace {
            name: "dev".to_string(),
            owner: "alice".to_string(),
            agents: vec![
                Agent {
                    id: "agent-main".to_string(),
                    name: "main".to_string(),
                    status: AgentStatus::Connected,
                },
                Agent {
                    id: "agent-gpu".to_string(),
                    name: "gpu".to_string(),
                    status: AgentStatus::Disconnected,
                },
            ],
        }
    }

    /// Flip one agent between connected and disconnected.
    pub fn flap_agent(workspace: &mut Workspace, rng: &mut impl rand::Rng) {
        if workspace.agents.is_empty() {
            return;
        }

        let index = rng.random_range(0..workspace.agents.len());
        let agent = &mut workspace.agents[index];
        agent.status = match agent.status {
            AgentStatus::Connected => AgentStatus::Disconnected,
            _ => AgentStatus::Connected,
        };
    }
}

/// Mock listening ports.
pub mod ports {
    use super::*;

    /// A typical web development stack.
    pub fn web_stack() -> Vec<ListeningPort> {
        vec![
            ListeningPort::new(3000, "node"),
            ListeningPort::new(5432, "postgres"),
            ListeningPort::new(8080, ""),
        ]
    }

    /// A port list that varies between refreshes.
    pub fn varied(rng: &mut impl rand::Rng) -> Vec<ListeningPort> {
        let mut ports = web_stack();

        if rng.random_range(0u32..3u32) == 0 {
            ports.push(ListeningPort::new(
                9000 + rng.random_range(0u16..100u16),
                "",
            ));
        }

        if rng.random_range(0u32..4u32) == 0 {
            ports.pop();
        }

        ports
    }
}

/// Mock template README.
pub mod readme {
    /// A README exercising the Markdown features the dashboard renders:
    /// headings, emphasis, links, fenced code, and a table.
    pub fn template_readme() -> String {
        r#"# Development workspace

This template provisions a **Linux** workspace with the usual suspects
preinstalled. See the [getting started guide](https://example.com/docs) for
details.

## Connecting

```sh
wharf ssh dev
```

Exposed services end up on the ports below:

| Service  | Port |
| -------- | ---- |
| Web      | 3000 |
| Database | 5432 |

Use `wharf port-forward` or the dashboard's port controls to reach them.
"#
        .to_string()
    }
}
