use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::core::{FetchGate, ViewPhase};
use super::upvote::{submit_upvote, OnError, UpvoteControl, UpvoteTarget};
use crate::api::{AngleTag, ApiClient, IdeaDetail};
use crate::error::ClientError;

/// View state for a single idea's page: the idea, its critiques, angle
/// coverage, and the upvote controls for the idea and each critique.
pub struct IdeaDetailView {
    client: ApiClient,
    phase: ViewPhase,
    idea: Option<IdeaDetail>,
    idea_vote: UpvoteControl,
    critique_votes: HashMap<String, UpvoteControl>,
    gate: FetchGate,
}

impl IdeaDetailView {
    /// Create an unloaded detail view
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            idea: None,
            idea_vote: UpvoteControl::new(0),
            critique_votes: HashMap::new(),
            gate: FetchGate::default(),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// The loaded idea, if the last fetch succeeded
    pub fn idea(&self) -> Option<&IdeaDetail> {
        self.idea.as_ref()
    }

    /// Upvote control for the idea itself
    pub fn idea_vote(&self) -> &UpvoteControl {
        &self.idea_vote
    }

    /// Upvote control for one of the idea's critiques
    pub fn critique_vote(&self, critique_id: &str) -> Option<&UpvoteControl> {
        self.critique_votes.get(critique_id)
    }

    /// Angles already covered by the idea's critiques, as a set union
    pub fn coverage(&self) -> BTreeSet<AngleTag> {
        self.idea
            .as_ref()
            .map(IdeaDetail::covered_angles)
            .unwrap_or_default()
    }

    /// Fetch the idea by id, replacing any previously loaded state
    pub async fn load(&mut self, id: &str) {
        self.phase = ViewPhase::Loading;
        let seq = self.gate.issue();

        let result = self.client.get_idea(id).await;
        if !self.gate.is_current(seq) {
            debug!(seq, "discarding superseded idea detail response");
            return;
        }

        match result {
            Ok(idea) => {
                self.idea_vote = UpvoteControl::new(idea.upvote_count);
                self.critique_votes = idea
                    .critiques
                    .iter()
                    .map(|c| (c.id.clone(), UpvoteControl::new(c.upvote_count)))
                    .collect();
                self.idea = Some(idea);
                self.phase = ViewPhase::Ready;
            }
            Err(e) => {
                // Rendered as "idea not found", not as a blocking error.
                warn!(error = %e, idea_id = id, "idea detail fetch failed");
                self.idea = None;
                self.idea_vote = UpvoteControl::new(0);
                self.critique_votes.clear();
                self.phase = ViewPhase::Error;
            }
        }
    }

    /// Upvote the idea. The detail-page call site surfaces failures as a
    /// blocking error for the caller to display.
    pub async fn upvote_idea(&mut self, token: Option<&str>) -> Result<(), ClientError> {
        let Some(id) = self.idea.as_ref().map(|i| i.id.clone()) else {
            return Ok(());
        };
        submit_upvote(
            &self.client,
            &mut self.idea_vote,
            UpvoteTarget::Idea(&id),
            token,
            OnError::Blocking,
        )
        .await
    }

    /// Upvote one of the critiques. Critique cards fail silently.
    pub async fn upvote_critique(&mut self, critique_id: &str, token: Option<&str>) {
        let Some(control) = self.critique_votes.get_mut(critique_id) else {
            return;
        };
        let _ = submit_upvote(
            &self.client,
            control,
            UpvoteTarget::Critique(critique_id),
            token,
            OnError::Silent,
        )
        .await;
    }
}
