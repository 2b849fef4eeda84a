//! Client tests against a local mock server.

use httpmock::prelude::*;
use serde_json::json;

use wharf_api::{ApiConfig, Client, Error, UsageInterval};

fn client_for(server: &MockServer) -> Client {
    Client::new(&ApiConfig {
        base_url: server.base_url(),
        token: String::new(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_agent_listening_ports() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v0/agents/a1/listening-ports");
        then.status(200).json_body(json!({
            "ports": [
                { "port": 8080, "process_name": "node" },
                { "port": 5432, "process_name": "" },
            ]
        }));
    });

    let client = client_for(&server);
    let response = client.agent_listening_ports("a1").await.unwrap();

    mock.assert();
    assert_eq!(response.ports.len(), 2);
    assert_eq!(response.ports[0].label(), "node");
    assert_eq!(response.ports[1].label(), "5432");
}

#[tokio::test]
async fn test_workspace_snapshot() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v0/workspaces/alice/dev");
        then.status(200).json_body(json!({
            "name": "dev",
            "owner": "alice",
            "agents": [
                { "id": "a1", "name": "main", "status": "connected" },
                { "id": "a2", "name": "gpu", "status": "disconnected" },
            ]
        }));
    });

    let client = client_for(&server);
    let workspace = client.workspace("alice", "dev").await.unwrap();

    mock.assert();
    assert_eq!(workspace.name, "dev");
    assert_eq!(workspace.agents.len(), 2);
    assert!(workspace.agents[0].status.is_connected());
    assert!(!workspace.agents[1].status.is_connected());
}

#[tokio::test]
async fn test_active_users_interval_query() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v0/insights/active-users")
            .query_param("interval", "week");
        then.status(200).json_body(json!([
            { "date": "2024-03-04", "amount": 12 },
            { "date": "2024-03-11", "amount": 18 },
        ]));
    });

    let client = client_for(&server);
    let samples = client.active_users(UsageInterval::Week).await.unwrap();

    mock.assert();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].amount, 18);
}

#[tokio::test]
async fn test_template_readme_text() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v0/workspaces/alice/dev/readme");
        then.status(200).body("# Hello\n\nSome **markdown**.");
    });

    let client = client_for(&server);
    let readme = client.template_readme("alice", "dev").await.unwrap();

    assert!(readme.starts_with("# Hello"));
}

#[tokio::test]
async fn test_api_error_body_is_decoded() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v0/agents/a1/listening-ports");
        then.status(404)
            .json_body(json!({ "message": "agent not found" }));
    });

    let client = client_for(&server);
    let err = client.agent_listening_ports("a1").await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "agent not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_without_body_uses_reason() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v0/workspaces/alice/dev");
        then.status(500);
    });

    let client = client_for(&server);
    let err = client.workspace("alice", "dev").await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(!message.is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_token_header_sent() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v0/agents/a1/listening-ports")
            .header("Wharf-Session-Token", "secret");
        then.status(200).json_body(json!({ "ports": [] }));
    });

    let client = Client::new(&ApiConfig {
        base_url: server.base_url(),
        token: "secret".to_string(),
    })
    .unwrap();

    let response = client.agent_listening_ports("a1").await.unwrap();

    mock.assert();
    assert!(response.ports.is_empty());
}
