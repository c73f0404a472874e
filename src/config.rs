use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base url of the bug API, e.g. "http://localhost:9001/api"
  pub base_url: Option<String>,
  /// Per-request timeout
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: None,
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_timeout_secs() -> u64 {
  10
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// EnvFilter directive, overridden by RUST_LOG
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Write logs to a file in the data directory instead of stderr
  #[serde(default = "default_log_file")]
  pub file: bool,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      file: default_log_file(),
    }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_log_file() -> bool {
  true
}

impl ApiConfig {
  /// Resolve the base url from the config file, falling back to BUGCACHE_BASE_URL.
  pub fn base_url(&self) -> Result<Url> {
    let raw = match &self.base_url {
      Some(url) => url.clone(),
      None => std::env::var("BUGCACHE_BASE_URL").map_err(|_| {
        eyre!("No API base url configured. Set api.base_url, --base-url or BUGCACHE_BASE_URL.")
      })?,
    };

    let url = Url::parse(&raw).map_err(|e| eyre!("Invalid API base url '{}': {}", raw, e))?;
    if url.cannot_be_a_base() {
      return Err(eyre!("API base url '{}' cannot be used as a base", raw));
    }

    Ok(url)
  }
}

impl Config {
  /// Load configuration from `explicit_path`, or else from the first existing
  /// file in [`Config::candidate_paths`]. Without any file the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit_path {
      if !path.is_file() {
        return Err(eyre!("Config file not found: {}", path.display()));
      }
      return Self::load_from_path(path);
    }

    Self::candidate_paths()
      .into_iter()
      .find(|p| p.is_file())
      .map_or_else(|| Ok(Self::default()), |p| Self::load_from_path(&p))
  }

  /// `./bugcache.yaml`, then `<config dir>/bugcache/config.yaml`.
  pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("bugcache.yaml")];
    paths.extend(dirs::config_dir().map(|dir| dir.join("bugcache").join("config.yaml")));
    paths
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Get the API bearer token from the environment, if set.
  pub fn get_api_token() -> Option<String> {
    std::env::var("BUGCACHE_API_TOKEN")
      .ok()
      .filter(|t| !t.is_empty())
  }

  /// Directory for log files.
  pub fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("bugcache"))
  }
}
