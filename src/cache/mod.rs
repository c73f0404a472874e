//! Client-side cache of the bug collection.
//!
//! This module provides a server-synchronized cache that:
//! - Fetches the collection at most once until it is invalidated
//! - Never has more than one fetch in flight
//! - Applies creations and updates only after the server confirmed them
//! - Exposes derived views through pure selectors

mod bug_cache;
mod commands;
mod event;
pub mod selectors;
mod state;

pub use bug_cache::{BugCache, LoadOutcome};
pub use commands::{BugCommand, CommandOutcome};
pub use event::BugEvent;
pub use state::{BugsState, LoadStatus};
