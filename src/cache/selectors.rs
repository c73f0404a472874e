//! Derived views over a bug snapshot.
//!
//! Selectors accept anything that embeds a [`BugsState`], so they work on a
//! bare snapshot as well as on the host [`AppState`](crate::store::AppState).

use super::state::{BugsState, LoadStatus};
use crate::api::{Bug, BugId, UserId};

/// Bugs that are not resolved, in list order.
pub fn unresolved_bugs<S>(state: &S) -> Vec<&Bug>
where
  S: AsRef<BugsState> + ?Sized,
{
  state
    .as_ref()
    .list
    .iter()
    .filter(|bug| !bug.resolved)
    .collect()
}

/// Selector for the bugs assigned to `user_id`, in list order.
///
/// ```ignore
/// let mine = bugs_by_user(5)(&state);
/// ```
pub fn bugs_by_user<S>(user_id: UserId) -> impl Fn(&S) -> Vec<&Bug>
where
  S: AsRef<BugsState> + ?Sized,
{
  move |state| {
    state
      .as_ref()
      .list
      .iter()
      .filter(|bug| bug.user_id == Some(user_id))
      .collect()
  }
}

/// Selector for a single bug.
pub fn bug_by_id<S>(id: BugId) -> impl Fn(&S) -> Option<&Bug>
where
  S: AsRef<BugsState> + ?Sized,
{
  move |state| state.as_ref().get(id)
}

pub fn is_loading<S>(state: &S) -> bool
where
  S: AsRef<BugsState> + ?Sized,
{
  state.as_ref().loading
}

pub fn load_status<S>(state: &S) -> LoadStatus
where
  S: AsRef<BugsState> + ?Sized,
{
  state.as_ref().status()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::AppState;

  fn app_state(list: Vec<Bug>) -> AppState {
    AppState::with_bugs(BugsState::with_list(list))
  }

  #[test]
  fn test_unresolved_bugs() {
    let state = app_state(vec![Bug::new(1).resolved(), Bug::new(2), Bug::new(3)]);

    let result = unresolved_bugs(&state);

    let ids: Vec<_> = result.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3]);
  }

  #[test]
  fn test_bugs_by_user() {
    let state = app_state(vec![Bug::new(1).assigned_to(5), Bug::new(2), Bug::new(3)]);

    let result = bugs_by_user(5)(&state);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
    assert_eq!(result[0].user_id, Some(5));
  }

  #[test]
  fn test_bugs_by_user_preserves_order() {
    let state = BugsState::with_list(vec![
      Bug::new(3).assigned_to(2),
      Bug::new(1).assigned_to(1),
      Bug::new(2).assigned_to(2),
    ]);

    let ids: Vec<_> = bugs_by_user(2)(&state).iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![3, 2]);
  }

  #[test]
  fn test_selectors_on_empty_state() {
    let state = BugsState::new();
    assert!(unresolved_bugs(&state).is_empty());
    assert!(bugs_by_user(1)(&state).is_empty());
    assert!(bug_by_id(1)(&state).is_none());
    assert!(!is_loading(&state));
    assert_eq!(load_status(&state), LoadStatus::Idle);
  }

  #[test]
  fn test_bug_by_id() {
    let state = app_state(vec![Bug::new(1), Bug::new(2).with_description("two")]);
    assert_eq!(
      bug_by_id(2)(&state).map(|b| b.description.as_str()),
      Some("two")
    );
  }
}
