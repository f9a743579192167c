#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod failures;
pub mod models;

pub use asset_paths::{AssetFieldSet, AssetPath, AssetResolver, resolve_asset_reference};
pub use config::ResolverConfig;
pub use failures::LoadFailures;
pub use models::{Fallback, ResolvedAsset, ResolvedRecord};
