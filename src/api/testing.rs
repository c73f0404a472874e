//! Scripted in-memory [`ApiClient`] for unit tests.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
  Get,
  Post,
  Patch,
}

/// A request the mock has seen.
#[derive(Debug, Clone)]
pub struct Recorded {
  pub verb: Verb,
  pub path: String,
  pub body: Option<Value>,
}

#[derive(Clone)]
struct Reply {
  status: u16,
  body: Value,
  gate: Option<Arc<Notify>>,
}

/// Replies with canned status/body pairs per (verb, path) and records history.
/// Unknown routes answer 404.
#[derive(Default)]
pub struct MockApi {
  routes: Mutex<HashMap<(Verb, String), Reply>>,
  history: Mutex<Vec<Recorded>>,
}

impl MockApi {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register (or replace) the reply for a route.
  pub fn on(&self, verb: Verb, path: &str, status: u16, body: Value) {
    self.insert(verb, path, status, body, None);
  }

  /// Like [`MockApi::on`], but the reply is held until the returned gate is notified.
  pub fn on_gated(&self, verb: Verb, path: &str, status: u16, body: Value) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    self.insert(verb, path, status, body, Some(Arc::clone(&gate)));
    gate
  }

  fn insert(&self, verb: Verb, path: &str, status: u16, body: Value, gate: Option<Arc<Notify>>) {
    self
      .routes
      .lock()
      .unwrap()
      .insert((verb, path.to_string()), Reply { status, body, gate });
  }

  pub fn history(&self) -> Vec<Recorded> {
    self.history.lock().unwrap().clone()
  }

  pub fn count(&self, verb: Verb) -> usize {
    self
      .history
      .lock()
      .unwrap()
      .iter()
      .filter(|r| r.verb == verb)
      .count()
  }

  async fn respond<T: DeserializeOwned>(
    &self,
    verb: Verb,
    path: &str,
    body: Option<Value>,
  ) -> Result<T, ApiError> {
    self.history.lock().unwrap().push(Recorded {
      verb,
      path: path.to_string(),
      body,
    });
    let reply = self
      .routes
      .lock()
      .unwrap()
      .get(&(verb, path.to_string()))
      .cloned();

    let Some(reply) = reply else {
      return Err(ApiError::Server { status: 404 });
    };

    if let Some(gate) = &reply.gate {
      gate.notified().await;
    }

    if (200..300).contains(&reply.status) {
      Ok(serde_json::from_value(reply.body)?)
    } else {
      Err(ApiError::Server {
        status: reply.status,
      })
    }
  }
}

impl ApiClient for MockApi {
  async fn get<T>(&self, path: &str) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    self.respond(Verb::Get, path, None).await
  }

  async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send,
  {
    let body = serde_json::to_value(body)?;
    self.respond(Verb::Post, path, Some(body)).await
  }

  async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send,
  {
    let body = serde_json::to_value(body)?;
    self.respond(Verb::Patch, path, Some(body)).await
  }
}
