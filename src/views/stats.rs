use tracing::warn;

use super::core::ViewPhase;
use crate::api::{ApiClient, PublicStats};

/// View state for the public stats page
pub struct StatsView {
    client: ApiClient,
    phase: ViewPhase,
    stats: Option<PublicStats>,
}

impl StatsView {
    /// Create an unloaded stats view
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            stats: None,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// The loaded snapshot, if the last fetch succeeded
    pub fn stats(&self) -> Option<&PublicStats> {
        self.stats.as_ref()
    }

    /// Fetch the aggregate snapshot
    pub async fn refresh(&mut self) {
        self.phase = ViewPhase::Loading;
        match self.client.get_stats().await {
            Ok(stats) => {
                self.stats = Some(stats);
                self.phase = ViewPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "stats fetch failed");
                self.stats = None;
                self.phase = ViewPhase::Error;
            }
        }
    }
}
