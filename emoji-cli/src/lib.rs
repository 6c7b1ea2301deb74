//! # Download Emoji CLI
//!
//! Terminal front end for the emoji catalog.
//!
//! ## Usage
//!
//! ```bash
//! download-emoji --dataset emoji_pretty.json categories
//! download-emoji --dataset emoji_pretty.json list "People & Body"
//! download-emoji --dataset emoji_pretty.json show thumbsup
//! download-emoji --dataset emoji_pretty.json download thumbsup --variation 1F44D-1F3FD --size 512
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `PickerConfig` - Dataset location, catalog settings and endpoints
//! - `DownloadClient` - HTTP client that fetches planned downloads
//! - `resolve_category` / `find_renderable` - Map command arguments onto the catalog
//! - `view` - Text rendering of tabs, grids and the emoji detail panel

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod client;
pub mod view;

pub use client::{DownloadClient, DownloadError};

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use emoji_core::catalog::DEFAULT_EXCLUDED_SORT_ORDER;
use emoji_core::download::DEFAULT_CONVERSION_ENDPOINT;
use emoji_core::glyph::DEFAULT_CDN_BASE;
use emoji_core::{
    Catalog, CatalogConfig, EmojiError, EmojiRecord, Endpoints, ImageFormat, Platform,
};
use thiserror::Error;

/// Command-line arguments for download-emoji.
#[derive(Debug, Clone, Parser)]
#[command(name = "download-emoji")]
#[command(about = "Browse the emoji catalog and download emoji images")]
#[command(version)]
pub struct CliArgs {
    /// Path to the emoji-datasource table (`emoji_pretty.json`)
    #[arg(long, env = "EMOJI_DATASET", default_value = "emoji_pretty.json")]
    pub dataset: PathBuf,

    /// Image set a record must be available in to be listed
    #[arg(long, env = "EMOJI_PLATFORM", default_value = "twitter")]
    pub platform: Platform,

    /// Sort orders to hide (repeatable)
    #[arg(long = "exclude-sort-order", default_values_t = [DEFAULT_EXCLUDED_SORT_ORDER])]
    pub excluded_sort_orders: Vec<u32>,

    /// Base URL of the Twemoji asset tree
    #[arg(long, env = "EMOJI_CDN_BASE", default_value = DEFAULT_CDN_BASE)]
    pub cdn_base: String,

    /// Image conversion service URL
    #[arg(long, env = "EMOJI_CONVERSION_ENDPOINT", default_value = DEFAULT_CONVERSION_ENDPOINT)]
    pub conversion_endpoint: String,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, one per view of the picker.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List category tabs
    Categories,

    /// Show the emoji grid of one category
    List {
        /// Category tab index or name
        category: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one emoji with its variations
    Show {
        /// Codepoint or short name
        emoji: String,
    },

    /// Download one emoji image
    Download {
        /// Codepoint or short name
        emoji: String,
        /// Variation codepoint (defaults to `emoji` when it names a variation, else the base glyph)
        #[arg(long)]
        variation: Option<String>,
        /// Output size in pixels (ignored for SVG)
        #[arg(long, default_value = "64")]
        size: String,
        /// Output format: png, jpeg or svg
        #[arg(long, default_value = "png")]
        format: ImageFormat,
        /// Directory to save into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

/// Picker configuration shared by every command.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Path to the emoji table.
    pub dataset: PathBuf,
    /// Which records are renderable.
    pub catalog: CatalogConfig,
    /// Image sources.
    pub endpoints: Endpoints,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset: PathBuf::from("emoji_pretty.json"),
            catalog: CatalogConfig::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl From<&CliArgs> for PickerConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            dataset: args.dataset.clone(),
            catalog: CatalogConfig {
                target_platform: args.platform,
                excluded_sort_orders: args.excluded_sort_orders.clone(),
            },
            endpoints: Endpoints {
                cdn_base: args.cdn_base.clone(),
                conversion_endpoint: args.conversion_endpoint.clone(),
            },
        }
    }
}

/// Errors from resolving command arguments against the catalog.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No tab has this name.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    /// The record exists but is excluded or unavailable on the target platform.
    #[error("{0} is not available in the current catalog")]
    NotRenderable(String),
    /// Catalog or store lookup failed.
    #[error(transparent)]
    Emoji(#[from] EmojiError),
}

/// Resolve a tab given by index or name.
///
/// # Errors
///
/// Returns [`EmojiError::CategoryNotFound`] for an out-of-range index and
/// [`LookupError::UnknownCategory`] for an unknown name.
pub fn resolve_category(catalog: &Catalog, category: &str) -> Result<usize, LookupError> {
    let category = category.trim();
    if let Ok(index) = category.parse::<usize>() {
        catalog.category_at(index)?;
        return Ok(index);
    }
    catalog
        .category_index(category)
        .ok_or_else(|| LookupError::UnknownCategory(category.to_string()))
}

/// Look up an emoji by codepoint or short name that is part of the catalog.
///
/// # Errors
///
/// Returns [`EmojiError::EmojiNotFound`] if nothing matches `key` and
/// [`LookupError::NotRenderable`] if the match was filtered out.
pub fn find_renderable<'a>(
    catalog: &'a Catalog,
    key: &str,
) -> Result<&'a EmojiRecord, LookupError> {
    let record = catalog
        .store()
        .find(key)
        .ok_or_else(|| EmojiError::EmojiNotFound(key.to_string()))?;
    if !catalog.contains(record) {
        return Err(LookupError::NotRenderable(record.short_name.clone()));
    }
    Ok(record)
}

/// The variation named by `key`, when `key` is a variation codepoint of `record`
/// rather than its base codepoint or a short name.
#[must_use]
pub fn implied_variation<'a>(record: &EmojiRecord, key: &'a str) -> Option<&'a str> {
    let key = key.trim();
    if record.unified.eq_ignore_ascii_case(key) || !record.owns_codepoint(key) {
        return None;
    }
    Some(key)
}
