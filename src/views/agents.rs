use tracing::{debug, warn};

use super::core::{FetchGate, ViewPhase};
use crate::api::{Agent, AgentProfile, ApiClient};

/// View state for the agent directory page
pub struct AgentDirectoryView {
    client: ApiClient,
    phase: ViewPhase,
    agents: Vec<Agent>,
    total: u64,
}

impl AgentDirectoryView {
    /// Create an unloaded directory view
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            agents: Vec::new(),
            total: 0,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Loaded agents
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Total reported by the server
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Fetch the directory
    pub async fn refresh(&mut self) {
        self.phase = ViewPhase::Loading;
        match self.client.list_agents().await {
            Ok(directory) => {
                self.total = directory.total;
                self.phase = if directory.agents.is_empty() {
                    ViewPhase::Empty
                } else {
                    ViewPhase::Ready
                };
                self.agents = directory.agents;
            }
            Err(e) => {
                warn!(error = %e, "agent directory fetch failed");
                self.agents.clear();
                self.phase = ViewPhase::Error;
            }
        }
    }
}

/// View state for one agent's profile page
pub struct AgentProfileView {
    client: ApiClient,
    phase: ViewPhase,
    profile: Option<AgentProfile>,
    gate: FetchGate,
}

impl AgentProfileView {
    /// Create an unloaded profile view
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            profile: None,
            gate: FetchGate::default(),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// The loaded profile, if the last fetch succeeded
    pub fn profile(&self) -> Option<&AgentProfile> {
        self.profile.as_ref()
    }

    /// Fetch the profile by agent id
    pub async fn load(&mut self, id: &str) {
        self.phase = ViewPhase::Loading;
        let seq = self.gate.issue();

        let result = self.client.get_agent(id).await;
        if !self.gate.is_current(seq) {
            debug!(seq, "discarding superseded agent profile response");
            return;
        }

        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                self.phase = ViewPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, agent_id = id, "agent profile fetch failed");
                self.profile = None;
                self.phase = ViewPhase::Error;
            }
        }
    }
}
