//! Cache that keeps the bug snapshot in sync with the server.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::event::BugEvent;
use super::state::BugsState;
use crate::api::{bug_path, ApiClient, ApiError, Bug, BugDraft, BugId, BugPatch, UserId, BUGS_PATH};

/// What a call to [`BugCache::load`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// The collection was fetched; holds the number of cached bugs
  Fetched(usize),
  /// The list was already fetched, the network was not contacted
  Cached,
  /// Another load is outstanding, the network was not contacted
  InFlight,
}

/// Client-side cache of the bug collection.
///
/// Every change to the snapshot goes through [`BugsState::apply`]. Mutations
/// are only applied after the server confirmed them; failures are returned to
/// the caller and leave the list untouched.
pub struct BugCache<C: ApiClient> {
  client: C,
  state: watch::Sender<BugsState>,
}

impl<C: ApiClient> BugCache<C> {
  pub fn new(client: C) -> Self {
    let (state, _) = watch::channel(BugsState::default());
    Self { client, state }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  /// Clone of the current snapshot.
  pub fn snapshot(&self) -> BugsState {
    self.state.borrow().clone()
  }

  /// Run a selector against the current snapshot without cloning it.
  pub fn select<R>(&self, selector: impl FnOnce(&BugsState) -> R) -> R {
    selector(&self.state.borrow())
  }

  /// Receiver notified after every applied event.
  pub fn subscribe(&self) -> watch::Receiver<BugsState> {
    self.state.subscribe()
  }

  fn emit(&self, event: BugEvent) {
    emit(&self.state, event);
  }

  /// Fetch the bug collection unless it is already cached or being fetched.
  ///
  /// A failed fetch clears `loading`, records the error and keeps whatever
  /// list was cached before. No retry is attempted.
  pub async fn load(&self) -> Result<LoadOutcome, ApiError> {
    let mut skipped = None;
    self.state.send_if_modified(|state| {
      if state.loading {
        skipped = Some(LoadOutcome::InFlight);
        return false;
      }
      if state.last_fetch.is_some() {
        skipped = Some(LoadOutcome::Cached);
        return false;
      }
      *state = std::mem::take(state).apply(BugEvent::LoadRequested);
      true
    });

    if let Some(outcome) = skipped {
      debug!(?outcome, "skipping bug fetch");
      return Ok(outcome);
    }

    let pending = PendingLoad::new(&self.state);
    match self.client.get::<Vec<Bug>>(BUGS_PATH).await {
      Ok(bugs) => {
        pending.settle(BugEvent::LoadSucceeded {
          bugs,
          fetched_at: Utc::now(),
        });
        let count = self.state.borrow().list.len();
        info!(count, "loaded bugs");
        Ok(LoadOutcome::Fetched(count))
      }
      Err(err) => {
        warn!(status = ?err.status(), error = %err, "failed to load bugs");
        pending.settle(BugEvent::LoadFailed {
          reason: err.to_string(),
        });
        Err(err)
      }
    }
  }

  /// Drop the fetch timestamp so the next [`BugCache::load`] hits the network.
  pub fn invalidate(&self) {
    self.emit(BugEvent::Invalidated);
  }

  /// Invalidate, then load.
  pub async fn refresh(&self) -> Result<LoadOutcome, ApiError> {
    self.invalidate();
    self.load().await
  }

  /// Create a bug on the server and cache the record it returns.
  pub async fn add(&self, draft: &BugDraft) -> Result<Bug, ApiError> {
    let bug: Bug = match self.client.post(BUGS_PATH, draft).await {
      Ok(bug) => bug,
      Err(err) => {
        warn!(status = ?err.status(), error = %err, "failed to add bug");
        return Err(err);
      }
    };

    info!(id = bug.id, "bug added");
    self.emit(BugEvent::BugAdded(bug.clone()));
    Ok(bug)
  }

  /// Assign a bug to a user. The cached assignee is taken from the server's reply.
  pub async fn assign(&self, bug_id: BugId, user_id: UserId) -> Result<Bug, ApiError> {
    let bug = self.patch(bug_id, &BugPatch::assign(user_id)).await?;
    let Some(confirmed) = bug.user_id else {
      warn!(bug_id, "server did not confirm assignment");
      return Err(ApiError::Unconfirmed("assignment"));
    };

    info!(bug_id, user_id = confirmed, "bug assigned");
    self.emit(BugEvent::BugAssigned {
      id: bug_id,
      user_id: confirmed,
    });
    Ok(bug)
  }

  /// Mark a bug resolved once the server reports it resolved.
  pub async fn resolve(&self, bug_id: BugId) -> Result<Bug, ApiError> {
    let bug = self.patch(bug_id, &BugPatch::resolve()).await?;
    if !bug.resolved {
      warn!(bug_id, "server did not confirm resolution");
      return Err(ApiError::Unconfirmed("resolution"));
    }

    info!(bug_id, "bug resolved");
    self.emit(BugEvent::BugResolved { id: bug_id });
    Ok(bug)
  }

  async fn patch(&self, bug_id: BugId, patch: &BugPatch) -> Result<Bug, ApiError> {
    self
      .client
      .patch(&bug_path(bug_id), patch)
      .await
      .map_err(|err| {
        warn!(bug_id, status = ?err.status(), error = %err, "failed to update bug");
        err
      })
  }
}

fn emit(state: &watch::Sender<BugsState>, event: BugEvent) {
  state.send_modify(|state| *state = std::mem::take(state).apply(event));
}

/// Outstanding load. If the load future is dropped before the request
/// finishes, the load is recorded as failed so `loading` does not stick.
struct PendingLoad<'a> {
  state: &'a watch::Sender<BugsState>,
  settled: bool,
}

impl<'a> PendingLoad<'a> {
  fn new(state: &'a watch::Sender<BugsState>) -> Self {
    Self {
      state,
      settled: false,
    }
  }

  fn settle(mut self, event: BugEvent) {
    self.settled = true;
    emit(self.state, event);
  }
}

impl Drop for PendingLoad<'_> {
  fn drop(&mut self) {
    if !self.settled {
      emit(
        self.state,
        BugEvent::LoadFailed {
          reason: "load cancelled".to_string(),
        },
      );
    }
  }
}
