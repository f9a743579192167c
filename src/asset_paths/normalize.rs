use std::fmt;

use super::filters::is_absolute_url;

/// Marker segment that precedes the part of a stored path the upload server expects.
const UPLOADS_MARKER: &str = "uploads/";

/// Classified reference to an image resource, produced transiently at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPath {
    /// Fully-qualified HTTP(S) URL, kept byte-for-byte.
    Absolute(String),
    /// Canonical path to append to the upload root.
    ServerRelative(String),
    /// No usable reference was supplied.
    Empty,
}

impl AssetPath {
    /// Borrow the underlying reference, or `None` for [`AssetPath::Empty`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absolute(value) | Self::ServerRelative(value) => Some(value),
            Self::Empty => None,
        }
    }

    /// Returns `true` when no reference was supplied.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Absolute(_) => "absolute",
            Self::ServerRelative(_) => "server-relative",
            Self::Empty => "empty",
        }
    }
}

impl From<Option<&str>> for AssetPath {
    fn from(raw: Option<&str>) -> Self {
        normalize_asset_path(raw)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

/// Turn a raw, possibly malformed image path into a classified [`AssetPath`].
///
/// Backslashes from Windows-style paths become forward slashes, anything up to and including
/// the first `uploads/` segment is dropped, and a single leading slash is removed. The value
/// is otherwise passed through untouched: no extension or character validation happens here.
pub fn normalize_asset_path(raw: Option<&str>) -> AssetPath {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return AssetPath::Empty;
    };

    if is_absolute_url(raw) {
        return AssetPath::Absolute(raw.to_string());
    }

    let mut clean = raw.replace('\\', "/");
    if let Some(index) = clean.find(UPLOADS_MARKER) {
        clean.replace_range(..index + UPLOADS_MARKER.len(), "");
    }
    if clean.starts_with('/') {
        clean.remove(0);
    }

    AssetPath::ServerRelative(clean)
}
