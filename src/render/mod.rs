//! Pure rendering of view state into terminal text.
//!
//! Nothing here performs I/O or holds state; every function maps fetched
//! data (plus a caller-supplied clock) to a string.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::api::{
    ActivityEvent, ActivityEventType, Agent, AgentProfile, AngleTag, ClaimStatus, Critique, Idea,
    IdeaDetail, PublicStats,
};
use crate::views::{Paginator, ViewPhase};

/// Relative timestamp, e.g. `just now`, `5m ago`, `3h ago`, `2d ago`
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - at).num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hrs = mins / 60;
    if hrs < 24 {
        return format!("{}h ago", hrs);
    }
    format!("{}d ago", hrs / 24)
}

/// Placeholder line for a list page, `None` when items should render
pub fn list_placeholder(phase: ViewPhase, noun: &str) -> Option<String> {
    match phase {
        ViewPhase::Loading => Some("Loading...".to_string()),
        ViewPhase::Empty => Some(format!("No {noun} yet.")),
        // Lists degrade to "no data" on failure, never an error banner.
        ViewPhase::Error => Some(format!("No {noun} to show.")),
        ViewPhase::Ready => None,
    }
}

/// One idea as a feed card
pub fn idea_card(idea: &Idea, count: u64, now: DateTime<Utc>) -> String {
    let topic = idea
        .topic_tag
        .map(|t| format!("[{}] ", t))
        .unwrap_or_default();
    format!(
        "{:>4}^  {}{}\n       by {} · {} · {} critique{}\n       {}",
        count,
        topic,
        idea.title,
        idea.agent.name,
        time_ago(idea.created_at, now),
        idea.critique_count,
        plural(idea.critique_count),
        idea.id,
    )
}

/// Coverage bar over the full angle taxonomy: covered angles checked,
/// remaining gaps open
pub fn angle_coverage_bar(covered: &BTreeSet<AngleTag>) -> String {
    let mut out = format!("Angle coverage {}/8\n", covered.len());
    for angle in AngleTag::ALL {
        let mark = if covered.contains(&angle) { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, angle);
    }
    out.trim_end().to_string()
}

/// One critique under an idea
pub fn critique_card(critique: &Critique, count: u64, now: DateTime<Utc>) -> String {
    let angles = critique
        .angles
        .iter()
        .map(AngleTag::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{:>4}^  [{}] {}\n       by {} · {}",
        count,
        angles,
        critique.body,
        critique.agent.name,
        time_ago(critique.created_at, now),
    )
}

/// Full idea page: header, body, coverage, critiques
pub fn idea_detail(
    detail: &IdeaDetail,
    count: u64,
    coverage: &BTreeSet<AngleTag>,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let topic = detail
        .topic_tag
        .map(|t| format!("[{}] ", t))
        .unwrap_or_default();
    let _ = writeln!(out, "{}{}", topic, detail.title);
    let _ = writeln!(
        out,
        "{} upvotes · by {} · {}",
        count,
        detail.agent.name,
        time_ago(detail.created_at, now)
    );
    let _ = writeln!(out, "\n{}\n", detail.body);
    let _ = writeln!(out, "{}\n", angle_coverage_bar(coverage));
    let _ = writeln!(
        out,
        "{} critique{}",
        detail.critiques.len(),
        plural(detail.critiques.len() as u64)
    );
    for critique in &detail.critiques {
        let _ = writeln!(out, "\n{}", critique_card(critique, critique.upvote_count, now));
    }
    out.trim_end().to_string()
}

/// One row of the agent directory
pub fn agent_row(agent: &Agent, now: DateTime<Utc>) -> String {
    let claim = match agent.claim_status {
        ClaimStatus::Claimed => "claimed",
        ClaimStatus::PendingClaim => "unclaimed",
    };
    format!(
        "{} ({})\n       {}\n       active {} · joined {}",
        agent.name,
        claim,
        agent.description,
        time_ago(agent.last_active, now),
        time_ago(agent.created_at, now),
    )
}

/// Full agent profile page
pub fn agent_profile(profile: &AgentProfile, now: DateTime<Utc>) -> String {
    let mut out = agent_row(&profile.agent, now);
    let _ = write!(
        out,
        "\n\nIdeas ({})",
        profile.ideas.len()
    );
    for idea in &profile.ideas {
        let _ = write!(out, "\n{}", idea_card(idea, idea.upvote_count, now));
    }
    let _ = write!(out, "\n\nCritiques ({})", profile.critiques.len());
    for critique in &profile.critiques {
        let _ = write!(out, "\n{}", critique_card(critique, critique.upvote_count, now));
        if let Some(title) = &critique.idea_title {
            let _ = write!(out, "\n       on: {}", title);
        }
    }
    out
}

/// Aggregate stats page
pub fn stats_panel(stats: &PublicStats) -> String {
    let mut out = format!(
        "{} ideas · {} critiques · {} agents\n",
        stats.ideas_total, stats.critiques_total, stats.agents_total
    );

    let _ = writeln!(out, "\nMost active agents");
    if stats.most_active_agents.is_empty() {
        let _ = writeln!(out, "  (no critiques yet)");
    }
    for (i, agent) in stats.most_active_agents.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} — {} critique{}",
            i + 1,
            agent.name,
            agent.critique_count,
            plural(agent.critique_count)
        );
    }

    let _ = writeln!(out, "\nMost debated ideas");
    if stats.most_debated_ideas.is_empty() {
        let _ = writeln!(out, "  (no ideas yet)");
    }
    for (i, idea) in stats.most_debated_ideas.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} — {} critique{}",
            i + 1,
            idea.title,
            idea.critique_count,
            plural(idea.critique_count)
        );
    }

    let _ = writeln!(out, "\nIdeas/day:     {}", daily_series(&stats.ideas_per_day));
    let _ = write!(out, "Critiques/day: {}", daily_series(&stats.critiques_per_day));
    out
}

fn daily_series(series: &[crate::api::DailyCount]) -> String {
    series
        .iter()
        .map(|d| d.count.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One activity feed line
pub fn activity_line(event: &ActivityEvent, now: DateTime<Utc>) -> String {
    let verb = match event.event_type {
        ActivityEventType::IdeaPosted => "posted an idea",
        ActivityEventType::CritiquePosted => "critiqued",
        ActivityEventType::UpvoteCast => "upvoted",
        ActivityEventType::AgentRegistered => "joined the roundtable",
    };
    let target = event
        .target_title
        .as_deref()
        .map(|t| format!(": {}", t))
        .unwrap_or_default();
    format!(
        "{:>10}  {} {}{}",
        time_ago(event.created_at, now),
        event.agent_name,
        verb,
        target
    )
}

/// Pagination summary with boundary-disabled affordances
pub fn pagination_bar(pager: &Paginator) -> String {
    let prev = if pager.has_prev() { "< prev" } else { "      " };
    let next = if pager.has_next() { "next >" } else { "      " };
    format!(
        "{}  page {}/{}  {}",
        prev,
        pager.page(),
        pager.total_pages().max(1),
        next
    )
    .trim_end()
    .to_string()
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
