use thiserror::Error;

/// Failure reported by an [`ApiClient`](super::ApiClient).
///
/// The cache treats every variant the same way when deciding state
/// transitions; the distinction is kept for callers and logs.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("server responded with status {status}")]
  Server { status: u16 },
  #[error("could not decode response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("server did not confirm the {0}")]
  Unconfirmed(&'static str),
}

impl ApiError {
  /// HTTP status for server errors, if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Server { status } => Some(*status),
      ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
      _ => None,
    }
  }
}
