//! The bug cache snapshot and its transition function.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::event::BugEvent;
use crate::api::{Bug, BugId};

/// Load lifecycle derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
  /// Nothing has been fetched yet
  Idle,
  /// A fetch is outstanding
  Loading,
  /// The list reflects a successful fetch
  Loaded,
  /// The most recent fetch failed
  Error,
}

impl LoadStatus {
  pub fn is_loading(&self) -> bool {
    matches!(self, LoadStatus::Loading)
  }

  pub fn is_loaded(&self) -> bool {
    matches!(self, LoadStatus::Loaded)
  }

  pub fn is_error(&self) -> bool {
    matches!(self, LoadStatus::Error)
  }
}

/// Complete value of the bug cache.
///
/// `list` only ever contains bugs returned by the server, unique by id and in
/// arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugsState {
  pub list: Vec<Bug>,
  /// True exactly while a load request is outstanding
  pub loading: bool,
  /// When the list was last refreshed from the server
  pub last_fetch: Option<DateTime<Utc>>,
  /// Reason of the most recent failed load
  pub error: Option<String>,
}

impl BugsState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot holding `list` with no load history.
  pub fn with_list(list: Vec<Bug>) -> Self {
    Self {
      list,
      ..Self::default()
    }
  }

  pub fn status(&self) -> LoadStatus {
    if self.loading {
      LoadStatus::Loading
    } else if self.error.is_some() {
      LoadStatus::Error
    } else if self.last_fetch.is_some() {
      LoadStatus::Loaded
    } else {
      LoadStatus::Idle
    }
  }

  pub fn get(&self, id: BugId) -> Option<&Bug> {
    self.list.iter().find(|bug| bug.id == id)
  }

  fn get_mut(&mut self, id: BugId) -> Option<&mut Bug> {
    self.list.iter_mut().find(|bug| bug.id == id)
  }

  /// Fold one event into the snapshot.
  ///
  /// Never performs I/O. Assign/resolve events naming an id that is not in
  /// the list leave the snapshot unchanged.
  pub fn apply(mut self, event: BugEvent) -> Self {
    match event {
      BugEvent::LoadRequested => {
        self.loading = true;
        self.error = None;
      }
      BugEvent::LoadSucceeded { bugs, fetched_at } => {
        let mut seen = HashSet::new();
        self.list = bugs.into_iter().filter(|bug| seen.insert(bug.id)).collect();
        self.loading = false;
        self.last_fetch = Some(fetched_at);
        self.error = None;
      }
      BugEvent::LoadFailed { reason } => {
        self.loading = false;
        self.error = Some(reason);
      }
      BugEvent::BugAdded(bug) => match self.get_mut(bug.id) {
        Some(existing) => *existing = bug,
        None => self.list.push(bug),
      },
      BugEvent::BugAssigned { id, user_id } => {
        if let Some(bug) = self.get_mut(id) {
          bug.user_id = Some(user_id);
        }
      }
      BugEvent::BugResolved { id } => {
        if let Some(bug) = self.get_mut(id) {
          bug.resolved = true;
        }
      }
      BugEvent::Invalidated => {
        self.last_fetch = None;
      }
    }
    self
  }
}

impl AsRef<BugsState> for BugsState {
  fn as_ref(&self) -> &BugsState {
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn loaded(bugs: Vec<Bug>) -> BugsState {
    BugsState::new().apply(BugEvent::LoadSucceeded {
      bugs,
      fetched_at: Utc::now(),
    })
  }

  #[test]
  fn test_initial_state_is_idle() {
    let state = BugsState::new();
    assert!(state.list.is_empty());
    assert!(!state.loading);
    assert!(state.last_fetch.is_none());
    assert_eq!(state.status(), LoadStatus::Idle);
  }

  #[test]
  fn test_load_lifecycle() {
    let state = BugsState::new().apply(BugEvent::LoadRequested);
    assert!(state.loading);
    assert!(state.status().is_loading());

    let at = Utc::now();
    let state = state.apply(BugEvent::LoadSucceeded {
      bugs: vec![Bug::new(1), Bug::new(2)],
      fetched_at: at,
    });
    assert!(!state.loading);
    assert_eq!(state.last_fetch, Some(at));
    assert_eq!(state.list.len(), 2);
    assert!(state.status().is_loaded());
  }

  #[test]
  fn test_load_failed_keeps_previous_list() {
    let before = loaded(vec![Bug::new(1)]);
    let state = before
      .clone()
      .apply(BugEvent::LoadRequested)
      .apply(BugEvent::LoadFailed {
        reason: "boom".to_string(),
      });

    assert!(!state.loading);
    assert_eq!(state.list, before.list);
    assert_eq!(state.last_fetch, before.last_fetch);
    assert_eq!(state.error.as_deref(), Some("boom"));
    assert!(state.status().is_error());
  }

  #[test]
  fn test_load_requested_clears_error() {
    let state = BugsState::new()
      .apply(BugEvent::LoadFailed {
        reason: "boom".to_string(),
      })
      .apply(BugEvent::LoadRequested);
    assert!(state.error.is_none());
  }

  #[test]
  fn test_load_succeeded_drops_duplicate_ids() {
    let state = loaded(vec![
      Bug::new(1).with_description("first"),
      Bug::new(2),
      Bug::new(1).with_description("second"),
    ]);
    assert_eq!(state.list.len(), 2);
    assert_eq!(state.list[0].description, "first");
  }

  #[test]
  fn test_bug_added_appends_in_arrival_order() {
    let state = BugsState::new()
      .apply(BugEvent::BugAdded(Bug::new(2)))
      .apply(BugEvent::BugAdded(Bug::new(1)));
    let ids: Vec<_> = state.list.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 1]);
  }

  #[test]
  fn test_bug_added_with_known_id_replaces() {
    let state = BugsState::with_list(vec![Bug::new(1), Bug::new(2)])
      .apply(BugEvent::BugAdded(Bug::new(1).with_description("new")));
    assert_eq!(state.list.len(), 2);
    assert_eq!(state.list[0].description, "new");
  }

  #[test]
  fn test_bug_assigned_updates_only_user() {
    let state = BugsState::with_list(vec![Bug::new(1).with_description("a"), Bug::new(2)])
      .apply(BugEvent::BugAssigned { id: 1, user_id: 9 });
    assert_eq!(state.list[0], Bug::new(1).with_description("a").assigned_to(9));
    assert_eq!(state.list[1], Bug::new(2));
  }

  #[test]
  fn test_bug_resolved() {
    let state =
      BugsState::with_list(vec![Bug::new(1)]).apply(BugEvent::BugResolved { id: 1 });
    assert!(state.list[0].resolved);
  }

  #[test]
  fn test_unknown_id_is_noop() {
    let before = BugsState::with_list(vec![Bug::new(1), Bug::new(2)]);
    let after = before
      .clone()
      .apply(BugEvent::BugAssigned { id: 7, user_id: 1 })
      .apply(BugEvent::BugResolved { id: 7 });
    assert_eq!(after, before);
  }

  #[test]
  fn test_invalidated_keeps_list() {
    let state = loaded(vec![Bug::new(1)]).apply(BugEvent::Invalidated);
    assert!(state.last_fetch.is_none());
    assert_eq!(state.list.len(), 1);
  }
}
