//! Error types for catalog and selection operations.

use thiserror::Error;

/// Result type for emoji operations.
pub type EmojiResult<T> = Result<T, EmojiError>;

/// Errors that can occur while resolving, selecting or planning emoji downloads.
#[derive(Debug, Error)]
pub enum EmojiError {
    /// A codepoint sequence could not be turned into a glyph or image reference.
    #[error("Cannot resolve glyph for codepoint '{codepoint}': {reason}")]
    GlyphResolution {
        /// The offending codepoint sequence.
        codepoint: String,
        /// Why resolution failed.
        reason: String,
    },

    /// No record matches the given key.
    #[error("Emoji not found: {0}")]
    EmojiNotFound(String),

    /// No category exists at the given tab index.
    #[error("Category index out of range: {0}")]
    CategoryNotFound(usize),

    /// The variation key does not belong to the open emoji.
    #[error("Variation '{variation}' does not belong to emoji '{record}'")]
    UnknownVariation {
        /// Base codepoint of the open emoji.
        record: String,
        /// The rejected variation key.
        variation: String,
    },

    /// No emoji is currently open.
    #[error("No emoji is open")]
    NothingOpen,

    /// The current selection does not allow a download.
    #[error("Download unavailable: {0}")]
    DownloadUnavailable(String),

    /// Unrecognised output format name.
    #[error("Unknown image format: {0}")]
    UnknownFormat(String),

    /// Unrecognised platform name.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// A configured base URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
