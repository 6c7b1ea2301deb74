//! # Download Emoji Core
//!
//! Catalog and selection logic for browsing and downloading emoji from the
//! emoji-datasource table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 emoji-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Record Store    │  Catalog Projector       │
//! │  - Dataset load  │  - Renderable filter     │
//! │  - Key lookup    │  - Category tabs         │
//! │                  │  - Variation lists       │
//! ├─────────────────────────────────────────────┤
//! │  Selection State │  Download Planner        │
//! │  - Open/close    │  - Twemoji SVG URLs      │
//! │  - Size/format   │  - Conversion requests   │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod download;
pub mod error;
pub mod glyph;
pub mod record;
pub mod state;
pub mod store;

pub use catalog::{
    by_category, categories, effective_variations, needs_variation_picker, sorted_renderable,
    Catalog, CatalogConfig,
};
pub use download::{DownloadPlan, Endpoints};
pub use error::{EmojiError, EmojiResult};
pub use record::{Availability, EmojiRecord, EmojiVariation, Platform};
pub use state::{ImageFormat, SelectionState};
pub use store::{EmojiStore, StoreError};

/// Emoji core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
