use chrono::{DateTime, Utc};

use crate::api::{Bug, BugId, UserId};

/// State changes folded into a [`BugsState`](super::BugsState).
///
/// Events are only produced by the cache's operations, and every one of them
/// except the load bookkeeping carries data the server has confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum BugEvent {
  /// A fetch of the whole collection started
  LoadRequested,
  /// The collection arrived; `fetched_at` is when the response was received
  LoadSucceeded {
    bugs: Vec<Bug>,
    fetched_at: DateTime<Utc>,
  },
  /// The fetch failed or was abandoned
  LoadFailed { reason: String },
  BugAdded(Bug),
  BugAssigned { id: BugId, user_id: UserId },
  BugResolved { id: BugId },
  /// Forget when the list was fetched so the next load hits the network
  Invalidated,
}
