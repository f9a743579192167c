//! Data structures produced while resolving catalog image references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown when no remote image is available.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fallback {
  /// Identifier of an image bundled with the client, e.g. `local://placeholder`.
  Bundled(String),
  /// Fixed remote placeholder URL.
  Remote(String),
}

impl Fallback {
  /// Renderable reference for the placeholder.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Bundled(value) | Self::Remote(value) => value,
    }
  }
}

impl Default for Fallback {
  fn default() -> Self {
    Self::Remote(crate::config::DEFAULT_PLACEHOLDER_URL.into())
  }
}

impl fmt::Display for Fallback {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Final image source handed to a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAsset {
  /// Absolute remote URL, either supplied as-is or joined onto the upload root.
  Remote(String),
  /// The configured placeholder reference.
  Fallback(String),
}

impl ResolvedAsset {
  /// Borrow the renderable string.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Remote(value) | Self::Fallback(value) => value,
    }
  }

  /// Returns `true` when the placeholder was chosen.
  pub fn is_fallback(&self) -> bool {
    matches!(self, Self::Fallback(_))
  }

  /// Consume the value, returning the renderable string.
  pub fn into_string(self) -> String {
    match self {
      Self::Remote(value) | Self::Fallback(value) => value,
    }
  }
}

impl fmt::Display for ResolvedAsset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Serializable summary of a catalog record after its image reference was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRecord {
  /// Stable identifier taken from the record, when present.
  pub id: Option<String>,
  /// Name of the field that supplied the image reference.
  pub field: Option<String>,
  /// Renderable image source.
  pub source: String,
  /// Whether the placeholder was used.
  pub fallback: bool,
}
