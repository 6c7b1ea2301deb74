//! Codepoint to glyph and image URL resolution.
//!
//! Image file names follow the Twemoji asset convention: lowercase hex
//! codepoints joined by `-`, with U+FE0F variation selectors dropped unless the
//! sequence contains a zero width joiner.

use crate::{EmojiError, EmojiResult};

/// Default Twemoji asset base.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/";

const ZERO_WIDTH_JOINER: u32 = 0x200D;
const VARIATION_SELECTOR_16: u32 = 0xFE0F;

/// Parse a hyphen-separated hex codepoint sequence into scalar values.
///
/// # Errors
///
/// Returns [`EmojiError::GlyphResolution`] for empty parts, non-hex parts, or
/// values that are not Unicode scalars.
pub fn codepoints(unified: &str) -> EmojiResult<Vec<char>> {
    let fail = |reason: String| EmojiError::GlyphResolution {
        codepoint: unified.to_string(),
        reason,
    };

    unified
        .split('-')
        .map(|part| {
            if part.is_empty() {
                return Err(fail("empty codepoint".to_string()));
            }
            if !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(fail(format!("'{part}' is not hex")));
            }
            let value = u32::from_str_radix(part, 16)
                .map_err(|e| fail(format!("'{part}' is out of range: {e}")))?;
            char::from_u32(value).ok_or_else(|| fail(format!("U+{value:X} is not a scalar value")))
        })
        .collect()
}

/// The glyph text a codepoint sequence renders as.
///
/// # Errors
///
/// See [`codepoints`].
pub fn glyph_text(unified: &str) -> EmojiResult<String> {
    Ok(codepoints(unified)?.into_iter().collect())
}

/// Asset file stem for a codepoint sequence.
///
/// # Errors
///
/// See [`codepoints`].
pub fn icon_name(unified: &str) -> EmojiResult<String> {
    let chars = codepoints(unified)?;
    let has_zwj = chars.iter().any(|&c| u32::from(c) == ZERO_WIDTH_JOINER);

    Ok(chars
        .into_iter()
        .map(u32::from)
        .filter(|&c| has_zwj || c != VARIATION_SELECTOR_16)
        .map(|c| format!("{c:x}"))
        .collect::<Vec<_>>()
        .join("-"))
}

/// SVG asset URL for a codepoint sequence under `base`.
///
/// A missing trailing slash on `base` is added.
///
/// # Errors
///
/// See [`codepoints`].
pub fn svg_url(base: &str, unified: &str) -> EmojiResult<String> {
    let icon = icon_name(unified)?;
    let separator = if base.ends_with('/') { "" } else { "/" };
    Ok(format!("{base}{separator}svg/{icon}.svg"))
}
