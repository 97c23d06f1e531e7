use std::collections::HashMap;

use tracing::{debug, warn};

use super::core::{FetchGate, Paginator, ViewPhase};
use super::upvote::{submit_upvote, OnError, UpvoteControl, UpvoteTarget};
use crate::api::{ApiClient, Idea, IdeaQuery, SortOption, TopicTag};

/// Items per page of the idea feed
pub const IDEA_PAGE_SIZE: u32 = 10;

/// View state for the paginated, filterable idea feed (the home page).
///
/// Any sort/topic/page change invalidates the current data and re-issues
/// the fetch; sort and topic changes also reset to page 1 so the user is
/// never stranded on a page the new filter cannot satisfy.
pub struct IdeaFeedView {
    client: ApiClient,
    phase: ViewPhase,
    ideas: Vec<Idea>,
    pager: Paginator,
    sort: SortOption,
    topic: Option<TopicTag>,
    gate: FetchGate,
    votes: HashMap<String, UpvoteControl>,
}

impl IdeaFeedView {
    /// Create a feed with default inputs (recent, all topics, page 1)
    pub fn new(client: ApiClient) -> Self {
        Self::with_inputs(client, SortOption::Recent, None)
    }

    /// Create a feed with explicit initial inputs; nothing is fetched yet
    pub fn with_inputs(client: ApiClient, sort: SortOption, topic: Option<TopicTag>) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            ideas: Vec::new(),
            pager: Paginator::new(IDEA_PAGE_SIZE),
            sort,
            topic,
            gate: FetchGate::default(),
            votes: HashMap::new(),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Ideas on the current page
    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    /// Pagination state
    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    /// Active sort order
    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Active topic filter, `None` meaning all topics
    pub fn topic(&self) -> Option<TopicTag> {
        self.topic
    }

    /// Query the next fetch will send
    pub fn query(&self) -> IdeaQuery {
        IdeaQuery {
            sort: Some(self.sort),
            topic: self.topic,
            limit: Some(self.pager.page_size()),
            offset: Some(self.pager.offset()),
        }
    }

    /// Fetch the current page with the current inputs
    pub async fn refresh(&mut self) {
        self.phase = ViewPhase::Loading;
        let seq = self.gate.issue();
        let query = self.query();

        let result = self.client.list_ideas(&query).await;
        if !self.gate.is_current(seq) {
            debug!(seq, "discarding superseded idea feed response");
            return;
        }

        match result {
            Ok(page) => {
                self.pager.set_total(page.total);
                self.phase = if page.ideas.is_empty() {
                    ViewPhase::Empty
                } else {
                    ViewPhase::Ready
                };
                self.votes = page
                    .ideas
                    .iter()
                    .map(|idea| (idea.id.clone(), UpvoteControl::new(idea.upvote_count)))
                    .collect();
                self.ideas = page.ideas;
            }
            Err(e) => {
                // The feed degrades to "no data", it never shows a banner.
                warn!(error = %e, "idea feed fetch failed");
                self.ideas.clear();
                self.votes.clear();
                self.phase = ViewPhase::Error;
            }
        }
    }

    /// Change the sort order, reset to page 1 and re-fetch
    pub async fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.pager.reset();
        self.refresh().await;
    }

    /// Change the topic filter, reset to page 1 and re-fetch
    pub async fn set_topic(&mut self, topic: Option<TopicTag>) {
        self.topic = topic;
        self.pager.reset();
        self.refresh().await;
    }

    /// Open the feed directly at `page` with a single fetch. The page is
    /// clamped once the response reports the total; an out-of-range request
    /// costs one extra fetch for the clamped page.
    pub async fn open_page(&mut self, page: u32) {
        self.pager.force_page(page);
        self.refresh().await;
        if self.pager.set_page(page) {
            self.refresh().await;
        }
    }

    /// Navigate to a page (clamped); re-fetches only if the page changed
    pub async fn set_page(&mut self, page: u32) {
        if self.pager.set_page(page) {
            self.refresh().await;
        }
    }

    /// Upvote control for a card on the current page
    pub fn vote_control(&self, idea_id: &str) -> Option<&UpvoteControl> {
        self.votes.get(idea_id)
    }

    /// Count displayed on a card: session-local control state when present,
    /// else the fetched count
    pub fn displayed_count(&self, idea: &Idea) -> u64 {
        self.votes
            .get(&idea.id)
            .map_or(idea.upvote_count, UpvoteControl::count)
    }

    /// Card-level upvote: failures are swallowed, the control re-enables
    pub async fn upvote(&mut self, idea_id: &str, token: Option<&str>) {
        let Some(control) = self.votes.get_mut(idea_id) else {
            return;
        };
        // Card call site: silent on failure.
        let _ = submit_upvote(
            &self.client,
            control,
            UpvoteTarget::Idea(idea_id),
            token,
            OnError::Silent,
        )
        .await;
    }
}
