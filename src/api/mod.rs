//! Access to the remote bug API.
//!
//! The cache only talks to the [`ApiClient`] trait. [`HttpApiClient`] is the
//! reqwest-backed implementation used by the binary.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod testing;

use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

pub use client::HttpApiClient;
pub use error::ApiError;
pub use types::{Bug, BugDraft, BugId, BugPatch, UserId};

/// Path of the bug collection.
pub const BUGS_PATH: &str = "/bugs";

/// Path of a single bug resource.
pub fn bug_path(id: BugId) -> String {
  format!("{}/{}", BUGS_PATH, id)
}

/// Minimal JSON API capability: GET, POST and PATCH against a resource path.
///
/// A "failure" covers both transport errors and non-success statuses.
pub trait ApiClient: Send + Sync {
  fn get<T>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>> + Send
  where
    T: DeserializeOwned + Send;

  fn post<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send;

  fn patch<B, T>(&self, path: &str, body: &B) -> impl Future<Output = Result<T, ApiError>> + Send
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send;
}
