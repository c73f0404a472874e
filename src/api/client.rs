use color_eyre::{eyre::eyre, Result};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{ApiClient, ApiError};
use crate::config::Config;

/// HTTP implementation of [`ApiClient`] on top of reqwest.
#[derive(Clone, Debug)]
pub struct HttpApiClient {
  http: reqwest::Client,
  base_url: Url,
  token: Option<String>,
}

impl HttpApiClient {
  /// Build a client from the loaded configuration and environment.
  pub fn from_config(config: &Config) -> Result<Self> {
    let base_url = config.api.base_url()?;
    let timeout = Duration::from_secs(config.api.timeout_secs);

    Self::new(base_url, timeout, Config::get_api_token())
      .map_err(|e| eyre!("Failed to create API client: {}", e))
  }

  pub fn new(base_url: Url, timeout: Duration, token: Option<String>) -> Result<Self, ApiError> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;

    Ok(Self {
      http,
      base_url,
      token,
    })
  }

  /// Resolve a resource path against the base url, keeping the base path prefix.
  fn endpoint(&self, path: &str) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments
        .pop_if_empty()
        .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    url
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let request = self.http.request(method, self.endpoint(path));
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  async fn send<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
    method: Method,
    path: &str,
  ) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(%method, path, %status, "api response");

    if !status.is_success() {
      return Err(ApiError::Server {
        status: status.as_u16(),
      });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }
}

impl ApiClient for HttpApiClient {
  async fn get<T>(&self, path: &str) -> Result<T, ApiError>
  where
    T: DeserializeOwned + Send,
  {
    let request = self.request(Method::GET, path);
    self.send(request, Method::GET, path).await
  }

  async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send,
  {
    let request = self.request(Method::POST, path).json(body);
    self.send(request, Method::POST, path).await
  }

  async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + Sync + ?Sized,
    T: DeserializeOwned + Send,
  {
    let request = self.request(Method::PATCH, path).json(body);
    self.send(request, Method::PATCH, path).await
  }
}
