use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{ListeningPortsResponse, UsageInterval, UsageSample, Workspace};

/// Header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "Wharf-Session-Token";

/// Request timeout for all API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by the deployment API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// REST client for the deployment API.
///
/// All queries are idempotent GETs and safe to retry; polling callers simply
/// reissue them on their interval.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    token: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            token: config.token.clone(),
            http,
        })
    }

    /// Fetch the ports an agent is currently listening on.
    pub async fn agent_listening_ports(&self, agent_id: &str) -> Result<ListeningPortsResponse> {
        let url = self
            .base_url
            .join(&format!("/api/v0/agents/{}/listening-ports", agent_id))?;
        self.get_json(url).await
    }

    /// Fetch a workspace snapshot including its agents.
    pub async fn workspace(&self, owner: &str, name: &str) -> Result<Workspace> {
        let url = self
            .base_url
            .join(&format!("/api/v0/workspaces/{}/{}", owner, name))?;
        self.get_json(url).await
    }

    /// Fetch the active-user series at the given granularity.
    pub async fn active_users(&self, interval: UsageInterval) -> Result<Vec<UsageSample>> {
        let mut url = self.base_url.join("/api/v0/insights/active-users")?;
        url.query_pairs_mut()
            .append_pair("interval", interval.as_str());
        self.get_json(url).await
    }

    /// Fetch the raw Markdown README of the workspace's template.
    pub async fn template_readme(&self, owner: &str, name: &str) -> Result<String> {
        let url = self
            .base_url
            .join(&format!("/api/v0/workspaces/{}/{}/readme", owner, name))?;

        let response = self.request(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }

        Ok(response.text().await?)
    }

    fn request(&self, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url);
        if !self.token.is_empty() {
            request = request.header(SESSION_TOKEN_HEADER, &self.token);
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let response = self.request(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }

        Ok(response.json().await?)
    }

    /// Decode the API's `{"message": ...}` error body, falling back to the
    /// HTTP reason phrase when the body is not in that shape.
    async fn api_error(&self, status: u16, response: reqwest::Response) -> Error {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("request failed")
                .to_string(),
        };

        Error::Api { status, message }
    }
}
