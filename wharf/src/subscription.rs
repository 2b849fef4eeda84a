use std::time::Duration;

use iced::Subscription;

use wharf_api::{ApiConfig, Client, UsageInterval};

use crate::message::{AgentId, Message};

/// Poll interval for agent listening ports.
pub const PORT_POLL_INTERVAL: Duration = Duration::from_millis(5_000);

/// Poll interval for the workspace snapshot.
pub const WORKSPACE_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Poll interval for the active-user series.
pub const USAGE_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Identity of a port-polling stream: one per connected agent.
///
/// The subscription is keyed by this value; when an agent leaves the
/// connected state the spec is no longer produced and the runtime drops the
/// stream, which is what suspends polling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortPoll {
    pub api: ApiConfig,
    pub agent: AgentId,
}

/// Create a subscription that polls an agent's listening ports.
pub fn port_poll_subscription(spec: PortPoll) -> Subscription<Message> {
    Subscription::run_with(spec, move |spec| {
        let spec = spec.clone();
        async_stream::stream! {
            let client = match Client::new(&spec.api) {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create API client");
                    yield Message::PortsFetchFailed {
                        agent: spec.agent.clone(),
                        error: e.to_string(),
                    };
                    return;
                }
            };

            loop {
                match client.agent_listening_ports(spec.agent.as_str()).await {
                    Ok(response) => {
                        yield Message::PortsLoaded {
                            agent: spec.agent.clone(),
                            ports: response.ports,
                        };
                    }
                    Err(e) => {
                        tracing::warn!(
                            agent = %spec.agent,
                            error = %e,
                            "Port listing fetch failed"
                        );
                        yield Message::PortsFetchFailed {
                            agent: spec.agent.clone(),
                            error: e.to_string(),
                        };
                    }
                }

                tokio::time::sleep(PORT_POLL_INTERVAL).await;
            }
        }
    })
}

/// Identity of the workspace-polling stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspacePoll {
    pub api: ApiConfig,
    pub owner: String,
    pub name: String,
}

/// Create a subscription that polls the workspace snapshot.
///
/// The template README is fetched on the same stream: once after the first
/// successful snapshot, and again only after a failed attempt.
pub fn workspace_subscription(spec: WorkspacePoll) -> Subscription<Message> {
    Subscription::run_with(spec, move |spec| {
        let spec = spec.clone();
        async_stream::stream! {
            let client = match Client::new(&spec.api) {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create API client");
                    yield Message::WorkspaceFetchFailed(e.to_string());
                    return;
                }
            };

            let mut readme_loaded = false;

            loop {
                match client.workspace(&spec.owner, &spec.name).await {
                    Ok(workspace) => {
                        yield Message::WorkspaceLoaded(workspace);

                        if !readme_loaded {
                            match client.template_readme(&spec.owner, &spec.name).await {
                                Ok(readme) => {
                                    readme_loaded = true;
                                    yield Message::ReadmeLoaded(readme);
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "README fetch failed");
                                    yield Message::ReadmeFetchFailed(e.to_string());
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Workspace fetch failed");
                        yield Message::WorkspaceFetchFailed(e.to_string());
                    }
                }

                tokio::time::sleep(WORKSPACE_POLL_INTERVAL).await;
            }
        }
    })
}

/// Identity of the usage-polling stream.
///
/// Keyed by interval: changing the chart granularity replaces the stream and
/// triggers an immediate refetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsagePoll {
    pub api: ApiConfig,
    pub interval: UsageInterval,
}

/// Create a subscription that polls the active-user series.
pub fn usage_subscription(spec: UsagePoll) -> Subscription<Message> {
    Subscription::run_with(spec, move |spec| {
        let spec = spec.clone();
        async_stream::stream! {
            let client = match Client::new(&spec.api) {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create API client");
                    yield Message::UsageFetchFailed(e.to_string());
                    return;
                }
            };

            loop {
                match client.active_users(spec.interval).await {
                    Ok(samples) => {
                        yield Message::UsageLoaded {
                            interval: spec.interval,
                            samples,
                        };
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Active-user fetch failed");
                        yield Message::UsageFetchFailed(e.to_string());
                    }
                }

                tokio::time::sleep(USAGE_POLL_INTERVAL).await;
            }
        }
    })
}

/// Create a tick subscription for periodic UI updates.
pub fn tick_subscription() -> Subscription<Message> {
    iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

/// Create a demo subscription that generates mock dashboard data.
///
/// This subscription simulates a live deployment by periodically varying
/// listening ports and occasionally flapping agent connectivity.
pub fn demo_subscription() -> Subscription<Message> {
    Subscription::run(|| {
        async_stream::stream! {
            use rand::{Rng, SeedableRng};

            use crate::mock;

            // Use a Send-compatible RNG (seeded from system entropy)
            let mut rng = rand::rngs::SmallRng::from_os_rng();

            let mut workspace = mock::workspace::workspace();

            yield Message::WorkspaceLoaded(workspace.clone());
            yield Message::UsageLoaded {
                interval: UsageInterval::Day,
                samples: mock::usage::daily(30),
            };
            yield Message::ReadmeLoaded(mock::readme::template_readme());

            loop {
                let delay = 2_000 + rng.random_range(0u64..2_000u64);
                tokio::time::sleep(Duration::from_millis(delay)).await;

                // Occasionally flap an agent's connectivity
                if rng.random_range(0u32..10u32) == 0 {
                    mock::workspace::flap_agent(&mut workspace, &mut rng);
                    yield Message::WorkspaceLoaded(workspace.clone());
                }

                // Refresh the port list of every connected agent
                for agent in workspace.agents.iter().filter(|a| a.status.is_connected()) {
                    yield Message::PortsLoaded {
                        agent: AgentId::new(agent.id.clone()),
                        ports: mock::ports::varied(&mut rng),
                    };
                }
            }
        }
    })
}
