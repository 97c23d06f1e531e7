use tracing::{debug, warn};

use crate::api::{ApiClient, UpvoteReceipt};
use crate::error::{ClientError, ClientResult};

/// What a call site does with a failed upvote.
///
/// Card controls swallow the failure; the detail-page control surfaces it
/// as a blocking message. Kept as per-call-site configuration rather than
/// two divergent code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    Silent,
    Blocking,
}

/// Which entity an upvote targets
#[derive(Debug, Clone, Copy)]
pub enum UpvoteTarget<'a> {
    Idea(&'a str),
    Critique(&'a str),
}

/// Session-scoped state of one upvote control.
///
/// The control disables on dispatch and re-enables only on confirmed
/// failure, so a slow network cannot double-submit. A successful upvote
/// pins the control disabled for the rest of the session; nothing is
/// persisted, so a restart may re-attempt and the server deduplicates.
#[derive(Debug, Clone)]
pub struct UpvoteControl {
    count: u64,
    upvoted: bool,
    in_flight: bool,
}

impl UpvoteControl {
    /// Create a control showing the entity's last fetched count
    pub fn new(count: u64) -> Self {
        Self {
            count,
            upvoted: false,
            in_flight: false,
        }
    }

    /// Count currently displayed next to the control
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether this session has already upvoted the entity
    pub fn upvoted(&self) -> bool {
        self.upvoted
    }

    /// Whether the control accepts a click right now
    pub fn is_enabled(&self, has_credential: bool) -> bool {
        has_credential && !self.upvoted && !self.in_flight
    }

    /// Mark the request dispatched. Returns false when the control is
    /// unavailable, in which case no request must be issued.
    pub fn begin(&mut self, has_credential: bool) -> bool {
        if !self.is_enabled(has_credential) {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Apply the server-confirmed count. The displayed count is replaced,
    /// never locally incremented, so server-side dedup cannot cause drift.
    pub fn confirm(&mut self, server_count: u64) {
        self.count = server_count;
        self.upvoted = true;
        self.in_flight = false;
    }

    /// Confirmed failure: re-enable the control so the user may retry
    pub fn fail(&mut self) {
        self.in_flight = false;
    }
}

/// Drive one upvote attempt through a control.
///
/// Returns an error only for [`OnError::Blocking`] call sites; silent call
/// sites log at debug and report nothing. A `None` credential or an
/// unavailable control is a no-op.
pub async fn submit_upvote(
    client: &ApiClient,
    control: &mut UpvoteControl,
    target: UpvoteTarget<'_>,
    token: Option<&str>,
    on_error: OnError,
) -> Result<(), ClientError> {
    let Some(token) = token else {
        return Ok(());
    };
    if !control.begin(true) {
        return Ok(());
    }

    let result: ClientResult<UpvoteReceipt> = match target {
        UpvoteTarget::Idea(id) => client.upvote_idea(id, token).await,
        UpvoteTarget::Critique(id) => client.upvote_critique(id, token).await,
    };

    match result {
        Ok(receipt) => {
            control.confirm(receipt.upvote_count);
            Ok(())
        }
        Err(e) => {
            control.fail();
            match on_error {
                OnError::Silent => {
                    debug!(error = %e, "upvote failed, ignoring");
                    Ok(())
                }
                OnError::Blocking => {
                    warn!(error = %e, "upvote failed");
                    Err(e)
                }
            }
        }
    }
}
