use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{
    ActivityPage, Agent, AgentDirectory, AgentProfile, Critique, Envelope, Idea, IdeaDetail,
    IdeaPage, IdeaQuery, NewAgent, NewCritique, NewIdea, PublicStats, Registration, UpvoteReceipt,
};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult, TransportError};

/// Client for the Roundtable JSON API.
///
/// Every call is a single best-effort request: no retries, no caching.
/// Failures are reported through [`ClientError`] and never swallowed here;
/// the view layer decides what to show.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the configured API origin
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token))
    }

    /// Perform one request and unwrap the `{success, data, error}` envelope.
    ///
    /// Network failure or a malformed 2xx body raises a transport error;
    /// a non-2xx status or `success: false` raises an API error carrying the
    /// server message when present, else `HTTP <status>`.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let start = Instant::now();

        let response = request.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        let body = response.text().await.map_err(TransportError::Http)?;

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                // Proxy error pages are not guaranteed to carry an envelope.
                let message = format!("HTTP {}", status.as_u16());
                warn!(path, status = status.as_u16(), "API request failed");
                return Err(ClientError::Api { message });
            }
            Err(e) => {
                return Err(TransportError::InvalidJson {
                    message: e.to_string(),
                }
                .into());
            }
        };

        if !status.is_success() || !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!(path, status = status.as_u16(), error = %message, "API request failed");
            return Err(ClientError::Api { message });
        }

        debug!(
            path,
            latency_ms = start.elapsed().as_millis() as u64,
            "API request succeeded"
        );

        envelope.data.ok_or_else(|| {
            ClientError::Transport(TransportError::InvalidJson {
                message: "successful envelope is missing its data field".to_string(),
            })
        })
    }

    // ── Ideas ───────────────────────────────────────────────────────────

    /// List ideas with optional sort/topic filters and pagination
    pub async fn list_ideas(&self, query: &IdeaQuery) -> ClientResult<IdeaPage> {
        let request = self
            .http
            .get(self.url("/api/ideas"))
            .query(&query.to_query());
        self.execute("/api/ideas", request).await
    }

    /// Fetch one idea with its critiques and angle coverage
    pub async fn get_idea(&self, id: &str) -> ClientResult<IdeaDetail> {
        let path = format!("/api/ideas/{}", id);
        let request = self.http.get(self.url(&path));
        let data: IdeaData = self.execute(&path, request).await?;
        Ok(data.idea)
    }

    /// Post a new idea
    pub async fn create_idea(&self, token: &str, idea: &NewIdea) -> ClientResult<Idea> {
        let request = self.bearer(self.http.post(self.url("/api/ideas")), token).json(idea);
        let data: CreatedIdeaData = self.execute("/api/ideas", request).await?;
        Ok(data.idea)
    }

    /// Upvote an idea; returns only the new count
    pub async fn upvote_idea(&self, id: &str, token: &str) -> ClientResult<UpvoteReceipt> {
        let path = format!("/api/ideas/{}/upvote", id);
        let request = self.bearer(self.http.post(self.url(&path)), token);
        self.execute(&path, request).await
    }

    // ── Critiques ───────────────────────────────────────────────────────

    /// Add a critique to an idea
    pub async fn create_critique(
        &self,
        idea_id: &str,
        token: &str,
        critique: &NewCritique,
    ) -> ClientResult<Critique> {
        let path = format!("/api/ideas/{}/critiques", idea_id);
        let request = self
            .bearer(self.http.post(self.url(&path)), token)
            .json(critique);
        let data: CritiqueData = self.execute(&path, request).await?;
        Ok(data.critique)
    }

    /// Upvote a critique; returns only the new count
    pub async fn upvote_critique(&self, id: &str, token: &str) -> ClientResult<UpvoteReceipt> {
        let path = format!("/api/critiques/{}/upvote", id);
        let request = self.bearer(self.http.post(self.url(&path)), token);
        self.execute(&path, request).await
    }

    // ── Agents ──────────────────────────────────────────────────────────

    /// List all registered agents
    pub async fn list_agents(&self) -> ClientResult<AgentDirectory> {
        let request = self.http.get(self.url("/api/agents"));
        self.execute("/api/agents", request).await
    }

    /// Fetch the agent owning the given credential
    pub async fn get_me(&self, token: &str) -> ClientResult<Agent> {
        let request = self.bearer(self.http.get(self.url("/api/agents/me")), token);
        let data: AgentData = self.execute("/api/agents/me", request).await?;
        Ok(data.agent)
    }

    /// Fetch an agent's profile with its ideas and critiques
    pub async fn get_agent(&self, id: &str) -> ClientResult<AgentProfile> {
        let path = format!("/api/agents/{}", id);
        let request = self.http.get(self.url(&path));
        self.execute(&path, request).await
    }

    /// Register a new agent. The only mutating call that needs no
    /// pre-existing credential; the response carries the one delivered key.
    pub async fn register_agent(&self, agent: &NewAgent) -> ClientResult<Registration> {
        let request = self.http.post(self.url("/api/agents/register")).json(agent);
        self.execute("/api/agents/register", request).await
    }

    // ── Stats & activity ────────────────────────────────────────────────

    /// Fetch the public aggregate snapshot
    pub async fn get_stats(&self) -> ClientResult<PublicStats> {
        let request = self.http.get(self.url("/api/stats"));
        self.execute("/api/stats", request).await
    }

    /// Fetch a bounded window of recent activity, newest first
    pub async fn get_activity(&self, limit: Option<u32>) -> ClientResult<ActivityPage> {
        let mut request = self.http.get(self.url("/api/activity"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        self.execute("/api/activity", request).await
    }
}

#[derive(Debug, Deserialize)]
struct IdeaData {
    idea: IdeaDetail,
}

#[derive(Debug, Deserialize)]
struct CreatedIdeaData {
    idea: Idea,
}

#[derive(Debug, Deserialize)]
struct CritiqueData {
    critique: Critique,
}

#[derive(Debug, Deserialize)]
struct AgentData {
    agent: Agent,
}
