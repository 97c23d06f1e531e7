use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::core::ViewPhase;
use crate::api::{ActivityEvent, ApiClient};

/// View state for the recent-activity feed.
///
/// Each refresh wholesale-replaces the event list; there is no incremental
/// merge and no dedup against previously seen events.
pub struct ActivityFeedView {
    client: ApiClient,
    phase: ViewPhase,
    events: Vec<ActivityEvent>,
    limit: u32,
}

impl ActivityFeedView {
    /// Create an unloaded feed requesting a window of `limit` events
    pub fn new(client: ApiClient, limit: u32) -> Self {
        Self {
            client,
            phase: ViewPhase::Loading,
            events: Vec::new(),
            limit,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Events from the last successful refresh, newest first
    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    /// Fetch the recent window once
    pub async fn refresh(&mut self) {
        match self.client.get_activity(Some(self.limit)).await {
            Ok(page) => {
                self.phase = if page.events.is_empty() {
                    ViewPhase::Empty
                } else {
                    ViewPhase::Ready
                };
                self.events = page.events;
            }
            Err(e) => {
                // Keep the last window on screen; a poll failure is transient.
                warn!(error = %e, "activity fetch failed");
                if self.events.is_empty() {
                    self.phase = ViewPhase::Error;
                }
            }
        }
    }
}

/// Background poller driving an [`ActivityFeedView`].
///
/// Fetches immediately on start, then once per interval. Ticks are
/// processed sequentially: a slow fetch delays the next tick instead of
/// overlapping it. Stopping (or dropping) the poller cancels the task
/// unconditionally.
pub struct ActivityPoller {
    state: Arc<Mutex<ActivityFeedView>>,
    handle: JoinHandle<()>,
}

impl ActivityPoller {
    /// Take ownership of a feed view and start refreshing it
    pub fn start(view: ActivityFeedView, interval: Duration) -> Self {
        let state = Arc::new(Mutex::new(view));
        let task_state = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately: fetch-on-mount.
                ticker.tick().await;
                task_state.lock().await.refresh().await;
                debug!("activity feed refreshed");
            }
        });

        Self { state, handle }
    }

    /// Snapshot the feed's phase and current event window
    pub async fn snapshot(&self) -> (ViewPhase, Vec<ActivityEvent>) {
        let view = self.state.lock().await;
        (view.phase(), view.events().to_vec())
    }

    /// Cancel the polling task
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ActivityPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
