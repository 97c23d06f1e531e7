//! Per-page view-state containers.
//!
//! Each page owns one container exclusively; no state crosses container
//! boundaries and nothing is cached between pages. Containers move through
//! [`ViewPhase`] as their single fetch settles, re-fetch when their inputs
//! change, and guard against stale responses with [`FetchGate`].
//!
//! - [`IdeaFeedView`]: paginated, filterable idea list
//! - [`IdeaDetailView`]: one idea with critiques and angle coverage
//! - [`AgentDirectoryView`] / [`AgentProfileView`]: agent pages
//! - [`StatsView`]: aggregate snapshot
//! - [`ActivityFeedView`] + [`ActivityPoller`]: the 30-second polling feed
//! - [`UpvoteControl`]: the optimistic upvote sub-protocol

mod activity;
mod agents;
mod core;
mod idea_detail;
mod idea_feed;
mod stats;
mod upvote;

pub use activity::*;
pub use agents::*;
pub use core::*;
pub use idea_detail::*;
pub use idea_feed::*;
pub use stats::*;
pub use upvote::*;
