//! Selection state for one browsing session.
//!
//! The front end reads this state to decide what to draw and mutates it in
//! response to user input. Every transition succeeds except
//! [`SelectionState::select_variation`], which rejects keys that do not
//! belong to the open emoji.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::effective_variations;
use crate::{EmojiError, EmojiRecord, EmojiResult};

/// Output size used when an emoji is opened.
pub const DEFAULT_OUTPUT_SIZE: i64 = 64;

/// Largest output size the conversion endpoint accepts.
pub const MAX_OUTPUT_SIZE: i64 = 16_384;

/// Image formats a download can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image.
    #[default]
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector image, downloaded without conversion.
    Svg,
}

impl ImageFormat {
    /// All formats in menu order.
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::Svg];

    /// Lowercase name, also used as the file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
        }
    }

    /// Whether the output is a raster image with a pixel size.
    #[must_use]
    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = EmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| EmojiError::UnknownFormat(s.to_string()))
    }
}

/// Parse a size field the way a browser `parseInt` does.
///
/// Leading whitespace and a sign are accepted, a `0x` prefix switches to
/// hexadecimal, and parsing stops at the first invalid digit. Input without
/// any digits yields `0`. Out-of-range values saturate.
#[must_use]
pub fn parse_size_input(input: &str) -> i64 {
    let mut rest = input.trim_start();
    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = if rest.len() > 2 && (rest.starts_with("0x") || rest.starts_with("0X")) {
        rest = &rest[2..];
        16
    } else {
        10
    };

    let mut value: i64 = 0;
    let mut saw_digit = false;
    for digit in rest.chars().map_while(|c| c.to_digit(radix)) {
        saw_digit = true;
        value = value.saturating_mul(i64::from(radix)).saturating_add(i64::from(digit));
    }

    if !saw_digit {
        return 0;
    }
    if negative {
        -value
    } else {
        value
    }
}

/// The externally observable picker state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    session_id: Uuid,
    selected_category_index: usize,
    selected_record_key: Option<String>,
    selected_variation_key: Option<String>,
    /// Variation keys the open emoji accepts.
    allowed_variations: Vec<String>,
    output_size: i64,
    output_format: ImageFormat,
    is_open: bool,
    request_in_flight: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    /// Nothing open, first tab, 64px PNG, idle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            selected_category_index: 0,
            selected_record_key: None,
            selected_variation_key: None,
            allowed_variations: Vec::new(),
            output_size: DEFAULT_OUTPUT_SIZE,
            output_format: ImageFormat::Png,
            is_open: false,
            request_in_flight: false,
        }
    }

    /// Identifier of this session, for log correlation.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Switch tabs. Leaves the emoji selection untouched.
    pub fn select_category(&mut self, index: usize) {
        self.selected_category_index = index;
    }

    /// Open `record` with its base glyph selected and default output options.
    pub fn open_emoji(&mut self, record: &EmojiRecord) {
        tracing::debug!(session = %self.session_id, "Opening emoji {}", record.unified);

        let variations = effective_variations(record);
        self.allowed_variations = if variations.is_empty() {
            vec![record.unified.clone()]
        } else {
            variations.into_iter().map(|v| v.unified).collect()
        };
        self.selected_record_key = Some(record.unified.clone());
        self.selected_variation_key = Some(record.unified.clone());
        self.output_size = DEFAULT_OUTPUT_SIZE;
        self.output_format = ImageFormat::Png;
        self.is_open = true;
    }

    /// Close the open emoji and reset variation and output options.
    ///
    /// The record key is kept. An in-flight download is not affected.
    pub fn close_emoji(&mut self) {
        self.selected_variation_key.clone_from(&self.selected_record_key);
        self.output_size = DEFAULT_OUTPUT_SIZE;
        self.output_format = ImageFormat::Png;
        self.is_open = false;
    }

    /// Select one of the open emoji's variations.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::NothingOpen`] if no emoji is open and
    /// [`EmojiError::UnknownVariation`] if `key` is not one of its variations.
    /// The state is unchanged on error.
    pub fn select_variation(&mut self, key: &str) -> EmojiResult<()> {
        if !self.is_open {
            return Err(EmojiError::NothingOpen);
        }
        let Some(allowed) = self
            .allowed_variations
            .iter()
            .find(|v| v.eq_ignore_ascii_case(key))
        else {
            return Err(EmojiError::UnknownVariation {
                record: self.selected_record_key.clone().unwrap_or_default(),
                variation: key.to_string(),
            });
        };
        self.selected_variation_key = Some(allowed.clone());
        Ok(())
    }

    /// Set the output size from text input. Returns the parsed size.
    ///
    /// Non-numeric input becomes `0`; invalid sizes are stored as-is.
    pub fn set_output_size(&mut self, input: &str) -> i64 {
        self.output_size = parse_size_input(input);
        self.output_size
    }

    /// Set the output size directly.
    pub fn set_output_size_value(&mut self, size: i64) {
        self.output_size = size;
    }

    /// Set the output format. The size is kept even for SVG.
    pub fn set_output_format(&mut self, format: ImageFormat) {
        self.output_format = format;
    }

    /// Mark a download as started.
    pub fn begin_download(&mut self) {
        self.request_in_flight = true;
    }

    /// Mark the download as finished, successfully or not.
    pub fn end_download(&mut self) {
        self.request_in_flight = false;
    }

    /// Current tab index.
    #[must_use]
    pub fn selected_category_index(&self) -> usize {
        self.selected_category_index
    }

    /// Base codepoint of the last opened emoji.
    #[must_use]
    pub fn selected_record_key(&self) -> Option<&str> {
        self.selected_record_key.as_deref()
    }

    /// Codepoint of the selected variation.
    #[must_use]
    pub fn selected_variation_key(&self) -> Option<&str> {
        self.selected_variation_key.as_deref()
    }

    /// Current output size, possibly invalid.
    #[must_use]
    pub fn output_size(&self) -> i64 {
        self.output_size
    }

    /// Current output format.
    #[must_use]
    pub fn output_format(&self) -> ImageFormat {
        self.output_format
    }

    /// Whether an emoji is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether a download is running.
    #[must_use]
    pub fn request_in_flight(&self) -> bool {
        self.request_in_flight
    }

    /// Whether the output size is within `1..=MAX_OUTPUT_SIZE`.
    #[must_use]
    pub fn size_is_valid(&self) -> bool {
        (1..=MAX_OUTPUT_SIZE).contains(&self.output_size)
    }

    /// Whether the size field should accept input.
    #[must_use]
    pub fn size_input_enabled(&self) -> bool {
        self.output_format.is_raster()
    }

    /// Why the download action is disabled, if it is.
    #[must_use]
    pub fn download_blocker(&self) -> Option<String> {
        if !self.is_open {
            return Some("no emoji is open".to_string());
        }
        if self.request_in_flight {
            return Some("a download is already in progress".to_string());
        }
        if !self.size_is_valid() {
            return Some(format!(
                "size {} is outside 1..={MAX_OUTPUT_SIZE}",
                self.output_size
            ));
        }
        None
    }

    /// Whether the download action is enabled.
    #[must_use]
    pub fn can_download(&self) -> bool {
        self.download_blocker().is_none()
    }
}
