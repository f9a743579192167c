//! Command-line front-end for resolving catalog image references.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use asset_resolver::{AssetFieldSet, AssetResolver, Fallback, ResolvedRecord, ResolverConfig};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Library and binary targets both log at `info` unless `RUST_LOG` says otherwise.
const DEFAULT_LOG_FILTER: &str = "asset_resolver=info,asset_resolve=info";

#[derive(Parser, Debug)]
#[command(name = "asset-resolve", version)]
#[command(about = "Resolve catalog image references into renderable URLs")]
struct Args {
  /// Configuration file (defaults to asset_resolver.config.json in the working directory)
  #[arg(long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Upload root, overriding configuration and environment
  #[arg(long, value_name = "URL", global = true)]
  base_url: Option<String>,

  /// Remote placeholder URL used for records without an image
  #[arg(long, value_name = "URL", global = true, conflicts_with = "bundled_fallback")]
  fallback: Option<String>,

  /// Bundled placeholder identifier used for records without an image
  #[arg(long, value_name = "ID", global = true)]
  bundled_fallback: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Resolve raw paths given on the command line, one result per line
  Path {
    /// Raw image references; pass "" for a missing value
    #[arg(required = true, allow_hyphen_values = true)]
    raw: Vec<String>,
  },
  /// Resolve the image of every record in a JSON array
  Records {
    /// JSON file containing an array of records
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Which image fields to probe on each record
    #[arg(long, value_enum, default_value_t = FieldPreset::SongCover)]
    fields: FieldPreset,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldPreset {
  SongCover,
  SingerPhoto,
  SongDisk,
  AlbumCover,
}

impl FieldPreset {
  fn field_set(self) -> AssetFieldSet {
    match self {
      Self::SongCover => AssetFieldSet::SONG_COVER,
      Self::SingerPhoto => AssetFieldSet::SINGER_PHOTO,
      Self::SongDisk => AssetFieldSet::SONG_DISK,
      Self::AlbumCover => AssetFieldSet::ALBUM_COVER,
    }
  }
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let args = Args::parse();
  let resolver = build_resolver(&args)?;
  info!(
    base_url = resolver.base_url(),
    fallback = %resolver.fallback(),
    "resolver ready"
  );

  match &args.command {
    Command::Path { raw } => {
      for resolved in resolve_paths(&resolver, raw) {
        println!("{resolved}");
      }
    }
    Command::Records { input, fields } => {
      let resolved = resolve_records_file(&resolver, input, *fields)?;
      println!(
        "{}",
        serde_json::to_string_pretty(&resolved).context("failed to serialise records")?
      );
    }
  }

  Ok(())
}

fn resolve_paths(resolver: &AssetResolver, raw: &[String]) -> Vec<String> {
  raw
    .iter()
    .map(|value| resolver.resolve_str(Some(value.as_str())))
    .collect()
}

fn resolve_records_file(
  resolver: &AssetResolver,
  input: &Path,
  fields: FieldPreset,
) -> Result<Vec<ResolvedRecord>> {
  let contents =
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
  let document: Value = serde_json::from_str(&contents)
    .with_context(|| format!("failed to parse {}", input.display()))?;
  let records = document
    .as_array()
    .ok_or_else(|| anyhow!("{} must contain a JSON array of records", input.display()))?;

  debug!(count = records.len(), "resolving records");
  Ok(resolver.resolve_records(records, &fields.field_set()))
}

fn build_resolver(args: &Args) -> Result<AssetResolver> {
  let config = match &args.config {
    Some(path) => ResolverConfig::load(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => {
      let cwd = std::env::current_dir().context("failed to determine working directory")?;
      ResolverConfig::discover(&cwd)
    }
  };

  let base_url = match &args.base_url {
    Some(url) => url.clone(),
    None => config.effective_base_url(),
  };

  let fallback = match (&args.fallback, &args.bundled_fallback) {
    (Some(url), _) => Fallback::Remote(url.clone()),
    (None, Some(id)) => Fallback::Bundled(id.clone()),
    (None, None) => config.fallback,
  };

  Ok(AssetResolver::new(base_url, fallback))
}
