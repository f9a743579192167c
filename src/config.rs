//! Deployment configuration describing where uploaded images are served from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::asset_paths::AssetResolver;
use crate::models::Fallback;

/// File name searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset_resolver.config.json";
/// Upload root used when nothing else is configured. Only suitable for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/uploads";
/// Remote placeholder shown when a record carries no image.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://i.imgur.com/Rz7fZkG.png";
/// Environment variable overriding the upload root.
pub const BASE_URL_ENV: &str = "ASSET_BASE_URL";
/// Environment variable holding the API root the upload root can be derived from.
pub const API_URL_ENV: &str = "API_URL";

/// Resolver configuration loaded once per deployment and shared by every call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
  /// Explicit upload root, e.g. `https://cdn.example.com/uploads`.
  pub base_url: Option<String>,
  /// API root; when no upload root is set, `/api` is replaced by `/uploads`.
  pub api_url: Option<String>,
  /// Placeholder returned for records without an image.
  pub fallback: Fallback,
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unreadable file yields the default configuration so callers can keep
  /// resolving with the development upload root.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::load(&candidate) {
      Ok(config) => {
        debug!(path = %candidate.display(), "loaded resolver configuration");
        config
      }
      Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %candidate.display(), "no resolver configuration found, using defaults");
        Self::default()
      }
      Err(err) => {
        warn!(%err, "ignoring resolver configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Upload root after applying environment overrides from the process environment.
  pub fn effective_base_url(&self) -> String {
    self.effective_base_url_with(|key| std::env::var(key).ok())
  }

  /// Upload root after applying overrides from `lookup`.
  ///
  /// Precedence: [`BASE_URL_ENV`], `baseUrl`, an upload root derived from [`API_URL_ENV`] or
  /// `apiUrl`, and finally [`DEFAULT_BASE_URL`].
  pub fn effective_base_url_with<F>(&self, lookup: F) -> String
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(lookup(BASE_URL_ENV)) {
      return url;
    }
    if let Some(url) = non_empty(self.base_url.clone()) {
      return url;
    }
    if let Some(api) = non_empty(lookup(API_URL_ENV)).or_else(|| non_empty(self.api_url.clone())) {
      return upload_root_from_api_url(&api);
    }

    warn!(
      default = DEFAULT_BASE_URL,
      "no upload root configured, falling back to the development default"
    );
    DEFAULT_BASE_URL.to_string()
  }

  /// Consume the configuration, building a resolver with the process environment applied.
  pub fn into_resolver(self) -> AssetResolver {
    self.into_resolver_with(|key| std::env::var(key).ok())
  }

  /// Consume the configuration, building a resolver with overrides from `lookup` applied.
  pub fn into_resolver_with<F>(self, lookup: F) -> AssetResolver
  where
    F: Fn(&str) -> Option<String>,
  {
    let base_url = self.effective_base_url_with(lookup);
    AssetResolver::new(base_url, self.fallback)
  }
}

/// Derive the upload root served next to an API root: a trailing `/api` becomes `/uploads`.
pub fn upload_root_from_api_url(api_url: &str) -> String {
  let trimmed = api_url.trim_end_matches('/');
  let server = trimmed.strip_suffix("/api").unwrap_or(trimmed);
  format!("{server}/uploads")
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;
  use tempfile::tempdir;

  fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = pairs
      .iter()
      .map(|(key, value)| (key.to_string(), value.to_string()))
      .collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn defaults_to_development_upload_root() {
    let config = ResolverConfig::default();
    assert_eq!(config.effective_base_url_with(env(&[])), DEFAULT_BASE_URL);
    assert_eq!(config.fallback, Fallback::Remote(DEFAULT_PLACEHOLDER_URL.into()));
  }

  #[test]
  fn environment_base_url_overrides_file() {
    let config = ResolverConfig {
      base_url: Some("https://file.example.com/uploads".into()),
      ..ResolverConfig::default()
    };
    let lookup = env(&[(BASE_URL_ENV, "https://env.example.com/uploads")]);
    assert_eq!(
      config.effective_base_url_with(lookup),
      "https://env.example.com/uploads"
    );
  }

  #[test]
  fn blank_values_are_ignored() {
    let config = ResolverConfig {
      base_url: Some("  ".into()),
      api_url: Some("https://api.example.com/api".into()),
      ..ResolverConfig::default()
    };
    let lookup = env(&[(BASE_URL_ENV, ""), (API_URL_ENV, "")]);
    assert_eq!(
      config.effective_base_url_with(lookup),
      "https://api.example.com/uploads"
    );
  }

  #[test]
  fn derives_upload_root_from_api_url() {
    assert_eq!(
      upload_root_from_api_url("http://localhost:4000/api"),
      "http://localhost:4000/uploads"
    );
    assert_eq!(
      upload_root_from_api_url("http://localhost:4000/api/"),
      "http://localhost:4000/uploads"
    );
    assert_eq!(
      upload_root_from_api_url("https://media.example.com"),
      "https://media.example.com/uploads"
    );

    let lookup = env(&[(API_URL_ENV, "http://192.168.0.243:4000/api")]);
    assert_eq!(
      ResolverConfig::default().effective_base_url_with(lookup),
      "http://192.168.0.243:4000/uploads"
    );
  }

  #[test]
  fn builds_resolver_from_configuration() {
    let config = ResolverConfig {
      base_url: Some("https://cdn.example.com/uploads/".into()),
      fallback: Fallback::Bundled("local://placeholder".into()),
      ..ResolverConfig::default()
    };

    let resolver = config.into_resolver_with(env(&[]));
    assert_eq!(resolver.base_url(), "https://cdn.example.com/uploads");
    assert_eq!(
      resolver.resolve_str(Some("C:\\data\\uploads\\covers\\a.png")),
      "https://cdn.example.com/uploads/covers/a.png"
    );
    assert_eq!(resolver.resolve_str(None), "local://placeholder");
  }

  #[test]
  fn load_reads_configuration_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(
      &path,
      r#"{"baseUrl": "https://cdn.example.com/uploads", "fallback": {"bundled": "local://placeholder"}}"#,
    )
    .expect("failed to write config file");

    let config = ResolverConfig::load(&path).expect("configuration should load successfully");

    assert_eq!(config.base_url.as_deref(), Some("https://cdn.example.com/uploads"));
    assert_eq!(config.api_url, None);
    assert_eq!(config.fallback, Fallback::Bundled("local://placeholder".into()));
  }

  #[test]
  fn load_reports_parse_errors_with_path() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(&path, "{ not json").expect("failed to write config file");

    let err = ResolverConfig::load(&path).expect_err("invalid JSON should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
  }

  #[test]
  fn discover_falls_back_to_defaults() {
    let temp = tempdir().expect("failed to create temp dir");
    assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());

    std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ broken").expect("failed to write");
    assert_eq!(ResolverConfig::discover(temp.path()), ResolverConfig::default());
  }

  #[test]
  fn discover_reads_file_from_directory() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"apiUrl": "https://api.example.com/api"}"#,
    )
    .expect("failed to write config file");

    let config = ResolverConfig::discover(temp.path());
    assert_eq!(
      config.effective_base_url_with(env(&[])),
      "https://api.example.com/uploads"
    );
  }
}
