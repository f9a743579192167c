use serde_json::Value;
use tracing::trace;

use super::fields::{AssetFieldSet, record_id};
use super::normalize::{AssetPath, normalize_asset_path};
use crate::models::{Fallback, ResolvedAsset, ResolvedRecord};

/// Resolve a raw image reference against an upload root, returning the string to render.
///
/// Empty references produce `fallback`, absolute URLs are returned unchanged and every other
/// value is normalised and joined onto `base_url`.
pub fn resolve_asset_reference(raw: Option<&str>, base_url: &str, fallback: &str) -> String {
    let path = normalize_asset_path(raw);
    let resolved = render(&path, base_url, fallback);
    trace!(?raw, kind = path.kind(), %resolved, "resolved asset reference");
    resolved
}

fn render(path: &AssetPath, base_url: &str, fallback: &str) -> String {
    match path {
        AssetPath::Empty => fallback.to_string(),
        AssetPath::Absolute(url) => url.clone(),
        AssetPath::ServerRelative(relative) => format!("{base_url}/{relative}"),
    }
}

/// Asset resolver bound to a deployment's upload root and placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    base_url: String,
    fallback: Fallback,
}

impl AssetResolver {
    /// Create a resolver; a single trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, fallback: Fallback) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, fallback }
    }

    /// Upload root that server-relative paths are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Placeholder returned for empty references.
    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Resolve a raw reference, keeping track of whether the placeholder was chosen.
    pub fn resolve(&self, raw: Option<&str>) -> ResolvedAsset {
        let path = normalize_asset_path(raw);
        let resolved = render(&path, &self.base_url, self.fallback.as_str());
        trace!(?raw, kind = path.kind(), %resolved, "resolved asset reference");

        if path.is_empty() {
            ResolvedAsset::Fallback(resolved)
        } else {
            ResolvedAsset::Remote(resolved)
        }
    }

    /// Resolve a raw reference straight to its renderable string.
    pub fn resolve_str(&self, raw: Option<&str>) -> String {
        self.resolve(raw).into_string()
    }

    /// Probe `fields` on a JSON record and resolve the first usable image reference.
    pub fn resolve_record(&self, record: &Value, fields: &AssetFieldSet) -> ResolvedRecord {
        let selected = fields.select(record);
        let resolved = self.resolve(selected.map(|(_, value)| value));

        ResolvedRecord {
            id: record_id(record),
            field: selected.map(|(field, _)| field.to_string()),
            fallback: resolved.is_fallback(),
            source: resolved.into_string(),
        }
    }

    /// Resolve every record in a list, preserving order.
    pub fn resolve_records(&self, records: &[Value], fields: &AssetFieldSet) -> Vec<ResolvedRecord> {
        records
            .iter()
            .map(|record| self.resolve_record(record, fields))
            .collect()
    }
}
