//! Server-synchronized client-side cache for bug tracker entities.
//!
//! ```ignore
//! let client = HttpApiClient::from_config(&config)?;
//! let cache = BugCache::new(client);
//!
//! cache.load().await?;
//! cache.assign(1, 4).await?;
//!
//! let open = cache.select(|state| unresolved_bugs(state).len());
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod store;

pub use api::{ApiClient, ApiError, Bug, BugDraft, BugId, HttpApiClient, UserId};
pub use cache::selectors::{bug_by_id, bugs_by_user, is_loading, load_status, unresolved_bugs};
pub use cache::{BugCache, BugCommand, BugEvent, BugsState, CommandOutcome, LoadOutcome, LoadStatus};
pub use store::AppState;
