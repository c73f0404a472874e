//! Bug records as exchanged with the API.
//!
//! Field names follow the server's camelCase JSON (`userId`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned bug identifier.
pub type BugId = u64;

/// Identifier of the user a bug is assigned to.
pub type UserId = u64;

/// A bug as confirmed by the server. Always carries the server-assigned id.
///
/// A missing or null `description` reads as empty and a missing or null
/// `resolved` as false. Fields this type does not model are kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
  pub id: BugId,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<UserId>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub resolved: bool,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Bug {
  /// Bug with the given id and every other field at its default.
  pub fn new(id: BugId) -> Self {
    Self {
      id,
      description: String::new(),
      user_id: None,
      resolved: false,
      extra: Map::new(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn assigned_to(mut self, user_id: UserId) -> Self {
    self.user_id = Some(user_id);
    self
  }

  pub fn resolved(mut self) -> Self {
    self.resolved = true;
    self
  }
}

/// A bug that has not been created yet. The server assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BugDraft {
  pub description: String,
}

impl BugDraft {
  pub fn new(description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
    }
  }
}

/// Partial update sent with PATCH. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_id: Option<UserId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resolved: Option<bool>,
}

impl BugPatch {
  pub fn assign(user_id: UserId) -> Self {
    Self {
      user_id: Some(user_id),
      ..Self::default()
    }
  }

  pub fn resolve() -> Self {
    Self {
      resolved: Some(true),
      ..Self::default()
    }
  }
}
