//! Commands a host can dispatch into the bug cache.

use super::bug_cache::{BugCache, LoadOutcome};
use crate::api::{ApiClient, ApiError, Bug, BugDraft, BugId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BugCommand {
  Load,
  /// Invalidate and load again
  Refresh,
  Add(BugDraft),
  Assign { bug_id: BugId, user_id: UserId },
  Resolve { bug_id: BugId },
  Invalidate,
}

impl BugCommand {
  pub fn name(&self) -> &'static str {
    match self {
      BugCommand::Load => "load",
      BugCommand::Refresh => "refresh",
      BugCommand::Add(_) => "add",
      BugCommand::Assign { .. } => "assign",
      BugCommand::Resolve { .. } => "resolve",
      BugCommand::Invalidate => "invalidate",
    }
  }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
  Loaded(LoadOutcome),
  /// Server-confirmed record of a created or updated bug
  Saved(Bug),
  Invalidated,
}

impl<C: ApiClient> BugCache<C> {
  /// Route a command to the matching operation.
  pub async fn dispatch(&self, command: BugCommand) -> Result<CommandOutcome, ApiError> {
    tracing::debug!(command = command.name(), "dispatch");
    match command {
      BugCommand::Load => self.load().await.map(CommandOutcome::Loaded),
      BugCommand::Refresh => self.refresh().await.map(CommandOutcome::Loaded),
      BugCommand::Add(draft) => self.add(&draft).await.map(CommandOutcome::Saved),
      BugCommand::Assign { bug_id, user_id } => {
        self.assign(bug_id, user_id).await.map(CommandOutcome::Saved)
      }
      BugCommand::Resolve { bug_id } => self.resolve(bug_id).await.map(CommandOutcome::Saved),
      BugCommand::Invalidate => {
        self.invalidate();
        Ok(CommandOutcome::Invalidated)
      }
    }
  }
}
