//! Application state tree that embeds the bug slice.

use crate::cache::BugsState;

/// Entity slices of the application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entities {
  pub bugs: BugsState,
}

/// Root of the application state, with the bug cache under `entities.bugs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
  pub entities: Entities,
}

impl AppState {
  pub fn with_bugs(bugs: BugsState) -> Self {
    Self {
      entities: Entities { bugs },
    }
  }
}

impl AsRef<BugsState> for AppState {
  fn as_ref(&self) -> &BugsState {
    &self.entities.bugs
  }
}
