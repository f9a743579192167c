//! Renderer-side memory of images that failed to load.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{Fallback, ResolvedAsset};

/// Tracks which displayed items had their remote image fail, keyed by stable item id.
///
/// Ids stay valid when a list is filtered or reordered, so a failed item keeps showing the
/// placeholder wherever it moves.
#[derive(Debug, Clone, Default)]
pub struct LoadFailures {
  failed: BTreeSet<String>,
}

impl LoadFailures {
  /// Create an empty tracker.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a load error for `id`; returns `true` the first time the item fails.
  pub fn mark_failed(&mut self, id: impl Into<String>) -> bool {
    let id = id.into();
    let first = self.failed.insert(id.clone());
    if first {
      debug!(%id, "image failed to load, switching to placeholder");
    }
    first
  }

  /// Returns `true` when a load error was recorded for `id`.
  pub fn has_failed(&self, id: &str) -> bool {
    self.failed.contains(id)
  }

  /// Forget a recorded failure, e.g. after the item's image reference changed.
  pub fn clear(&mut self, id: &str) -> bool {
    self.failed.remove(id)
  }

  /// Forget every recorded failure.
  pub fn reset(&mut self) {
    self.failed.clear();
  }

  /// Number of items currently marked as failed.
  pub fn len(&self) -> usize {
    self.failed.len()
  }

  /// Returns `true` when no failures are recorded.
  pub fn is_empty(&self) -> bool {
    self.failed.is_empty()
  }

  /// Pick the string to render for `id`, swapping to `fallback` once the item has failed.
  pub fn source_for<'a>(
    &self,
    id: &str,
    resolved: &'a ResolvedAsset,
    fallback: &'a Fallback,
  ) -> &'a str {
    if self.has_failed(id) {
      fallback.as_str()
    } else {
      resolved.as_str()
    }
  }
}
