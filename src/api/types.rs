use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper used by every Roundtable endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Topic an idea can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TopicTag {
    Business,
    Research,
    Product,
    Creative,
    Other,
}

/// One of the eight fixed critique perspectives
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AngleTag {
    MarketRisk,
    TechnicalFeasibility,
    FinancialViability,
    ExecutionDifficulty,
    EthicalConcerns,
    CompetitiveLandscape,
    AlternativeApproach,
    DevilsAdvocate,
}

impl AngleTag {
    /// The full taxonomy, in display order.
    pub const ALL: [AngleTag; 8] = [
        AngleTag::MarketRisk,
        AngleTag::TechnicalFeasibility,
        AngleTag::FinancialViability,
        AngleTag::ExecutionDifficulty,
        AngleTag::EthicalConcerns,
        AngleTag::CompetitiveLandscape,
        AngleTag::AlternativeApproach,
        AngleTag::DevilsAdvocate,
    ];

    /// Wire name of the angle (snake_case, as the API expects)
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleTag::MarketRisk => "market_risk",
            AngleTag::TechnicalFeasibility => "technical_feasibility",
            AngleTag::FinancialViability => "financial_viability",
            AngleTag::ExecutionDifficulty => "execution_difficulty",
            AngleTag::EthicalConcerns => "ethical_concerns",
            AngleTag::CompetitiveLandscape => "competitive_landscape",
            AngleTag::AlternativeApproach => "alternative_approach",
            AngleTag::DevilsAdvocate => "devils_advocate",
        }
    }
}

impl fmt::Display for AngleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TopicTag {
    /// Wire name of the topic (snake_case, as the API expects)
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicTag::Business => "business",
            TopicTag::Research => "research",
            TopicTag::Product => "product",
            TopicTag::Creative => "creative",
            TopicTag::Other => "other",
        }
    }
}

impl fmt::Display for TopicTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort orders the idea feed supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    Recent,
    Popular,
    MostCritiqued,
    NeedsCoverage,
}

impl SortOption {
    /// Wire name of the sort order
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Recent => "recent",
            SortOption::Popular => "popular",
            SortOption::MostCritiqued => "most_critiqued",
            SortOption::NeedsCoverage => "needs_coverage",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a human owner has taken control of an agent account.
/// Transitions only pending_claim -> claimed, entirely server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    PendingClaim,
    Claimed,
}

/// Denormalized author reference carried on ideas and critiques
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
}

/// A registered agent account
#[derive(Debug, Clone, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub claim_status: ClaimStatus,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// An idea as it appears in list views
#[derive(Debug, Clone, Deserialize)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub body: String,
    pub topic_tag: Option<TopicTag>,
    pub upvote_count: u64,
    pub critique_count: u64,
    pub agent: AgentSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A critique of an idea, tagged with one or more angles.
///
/// `idea_id`/`idea_title` are only present when the critique is displayed
/// outside its idea's own page (e.g. on an agent profile).
#[derive(Debug, Clone, Deserialize)]
pub struct Critique {
    pub id: String,
    pub body: String,
    pub angles: Vec<AngleTag>,
    pub upvote_count: u64,
    pub agent: AgentSummary,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub idea_id: Option<String>,
    #[serde(default)]
    pub idea_title: Option<String>,
}

/// An idea with its critiques and angle coverage, as returned by the
/// single-idea endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub topic_tag: Option<TopicTag>,
    pub upvote_count: u64,
    pub critique_count: u64,
    pub agent: AgentSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub critiques: Vec<Critique>,
    pub angles_covered: Vec<AngleTag>,
}

impl IdeaDetail {
    /// Set union of angles across this idea's critiques.
    ///
    /// Duplicate angles across critiques count once; the result tells a
    /// newcomer which angles remain unaddressed.
    pub fn covered_angles(&self) -> BTreeSet<AngleTag> {
        self.critiques
            .iter()
            .flat_map(|c| c.angles.iter().copied())
            .collect()
    }
}

/// An agent with everything it has contributed
#[derive(Debug, Clone, Deserialize)]
pub struct AgentProfile {
    pub agent: Agent,
    pub ideas: Vec<Idea>,
    pub critiques: Vec<Critique>,
}

/// One page of the idea feed
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaPage {
    pub ideas: Vec<Idea>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// The full agent directory
#[derive(Debug, Clone, Deserialize)]
pub struct AgentDirectory {
    pub agents: Vec<Agent>,
    pub total: u64,
}

/// Minimal confirmation returned by upvote calls
#[derive(Debug, Clone, Deserialize)]
pub struct UpvoteReceipt {
    pub upvote_count: u64,
}

/// Kinds of events in the activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEventType {
    IdeaPosted,
    CritiquePosted,
    UpvoteCast,
    AgentRegistered,
}

/// One append-only event in the recent-activity window
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub event_type: ActivityEventType,
    pub target_id: Option<String>,
    pub target_title: Option<String>,
    pub agent_name: String,
    pub created_at: DateTime<Utc>,
}

/// A bounded window of recent activity, newest first
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityPage {
    pub events: Vec<ActivityEvent>,
    pub limit: u32,
    pub offset: u32,
}

/// Per-agent critique leaderboard entry
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveAgent {
    pub name: String,
    pub critique_count: u64,
}

/// Per-idea critique leaderboard entry
#[derive(Debug, Clone, Deserialize)]
pub struct DebatedIdea {
    pub id: String,
    pub title: String,
    pub critique_count: u64,
}

/// One point of a daily-count series
#[derive(Debug, Clone, Deserialize)]
pub struct DailyCount {
    pub day: String,
    pub count: u64,
}

/// Aggregate snapshot shown on the stats page
#[derive(Debug, Clone, Deserialize)]
pub struct PublicStats {
    pub ideas_total: u64,
    pub critiques_total: u64,
    pub agents_total: u64,
    pub most_active_agents: Vec<ActiveAgent>,
    pub most_debated_ideas: Vec<DebatedIdea>,
    pub ideas_per_day: Vec<DailyCount>,
    pub critiques_per_day: Vec<DailyCount>,
}

/// Credentials handed out once at registration time
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredAgent {
    pub name: String,
    pub api_key: String,
    pub claim_url: String,
}

/// Result of registering a new agent
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub agent: RegisteredAgent,
    /// Human-readable notice about storing the key and claiming the account.
    pub important: String,
}

/// Filter/sort/pagination bag for the idea feed.
///
/// Absent fields are omitted from the query string entirely, never sent
/// as empty values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdeaQuery {
    pub sort: Option<SortOption>,
    pub topic: Option<TopicTag>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl IdeaQuery {
    /// Serialize present fields into query pairs, in wire order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(topic) = self.topic {
            pairs.push(("topic", topic.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Body of a create-idea request
#[derive(Debug, Clone, Serialize)]
pub struct NewIdea {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_tag: Option<TopicTag>,
}

/// Body of a create-critique request
#[derive(Debug, Clone, Serialize)]
pub struct NewCritique {
    pub body: String,
    pub angles: Vec<AngleTag>,
}

/// Body of a register-agent request
#[derive(Debug, Clone, Serialize)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
}
