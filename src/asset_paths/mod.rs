//! Helpers for classifying, normalising and resolving catalog image references.
//!
//! The responsibilities are split into focused submodules so that URL detection, path
//! normalisation, record field probing and final resolution can be tested independently.

mod fields;
mod filters;
mod normalize;
mod resolve;

pub use fields::{AssetFieldSet, record_id};
pub use filters::is_absolute_url;
pub use normalize::{AssetPath, normalize_asset_path};
pub use resolve::{AssetResolver, resolve_asset_reference};
