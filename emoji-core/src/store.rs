//! Immutable storage for the bundled emoji table.
//!
//! The [`EmojiStore`] is loaded once at startup and shared read-only by the
//! catalog projection and the front end. Loading validates that every
//! codepoint (base records and variations combined) is unique.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::EmojiRecord;

/// Errors that can occur while loading the emoji table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred while reading the table.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The table is not valid JSON or a record is missing a required field.
    #[error("Malformed emoji table: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Two entries share a codepoint.
    #[error("Duplicate codepoint in emoji table: {0}")]
    DuplicateCodepoint(String),
}

/// Read-only emoji table with codepoint and short-name indexes.
///
/// Cloning is cheap; clones share the same table.
///
/// # Example
///
/// ```
/// use emoji_core::EmojiStore;
///
/// let store = EmojiStore::from_json(r#"[{
///     "name": "GRINNING FACE", "unified": "1F600",
///     "short_name": "grinning", "short_names": ["grinning"],
///     "category": "Smileys & Emotion", "subcategory": "face-smiling",
///     "sort_order": 1,
///     "has_img_apple": true, "has_img_google": true,
///     "has_img_twitter": true, "has_img_facebook": true
/// }]"#).unwrap();
///
/// assert_eq!(store.len(), 1);
/// assert!(store.find(":grinning:").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct EmojiStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    records: Vec<EmojiRecord>,
    /// Upper-cased codepoint (base or variation) to record index.
    by_codepoint: HashMap<String, usize>,
    /// Short name to record index.
    by_short_name: HashMap<String, usize>,
}

impl EmojiStore {
    /// Build a store from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCodepoint`] if any codepoint appears twice.
    pub fn new(records: Vec<EmojiRecord>) -> Result<Self, StoreError> {
        let mut by_codepoint = HashMap::with_capacity(records.len());
        let mut by_short_name = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let codepoints =
                std::iter::once(&record.unified).chain(record.variations().map(|v| &v.unified));
            for unified in codepoints {
                if by_codepoint
                    .insert(unified.to_ascii_uppercase(), index)
                    .is_some()
                {
                    return Err(StoreError::DuplicateCodepoint(unified.clone()));
                }
            }
            for short_name in &record.short_names {
                by_short_name.entry(short_name.clone()).or_insert(index);
            }
            by_short_name.entry(record.short_name.clone()).or_insert(index);
        }

        tracing::debug!("Loaded emoji table with {} records", records.len());

        Ok(Self {
            inner: Arc::new(StoreInner {
                records,
                by_codepoint,
                by_short_name,
            }),
        })
    }

    /// Parse a store from the JSON table text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] for invalid JSON or missing fields and
    /// [`StoreError::DuplicateCodepoint`] for repeated codepoints.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Parse a store from a reader.
    ///
    /// # Errors
    ///
    /// See [`EmojiStore::from_json`].
    pub fn from_reader(reader: impl Read) -> Result<Self, StoreError> {
        Self::new(serde_json::from_reader(reader)?)
    }

    /// Load a store from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read, otherwise see
    /// [`EmojiStore::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        tracing::info!("Loading emoji table from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The full table in dataset-file order.
    #[must_use]
    pub fn records(&self) -> &[EmojiRecord] {
        &self.inner.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// Look up a record by its base codepoint.
    #[must_use]
    pub fn get(&self, unified: &str) -> Option<&EmojiRecord> {
        self.inner
            .by_codepoint
            .get(&unified.to_ascii_uppercase())
            .map(|&i| &self.inner.records[i])
            .filter(|record| record.unified.eq_ignore_ascii_case(unified))
    }

    /// Look up a record by base codepoint, variation codepoint, or short name.
    ///
    /// Codepoints match case-insensitively; short names may be wrapped in
    /// colons (`:thumbsup:`). A variation codepoint resolves to its parent.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&EmojiRecord> {
        let key = key.trim();
        if let Some(&i) = self.inner.by_codepoint.get(&key.to_ascii_uppercase()) {
            return Some(&self.inner.records[i]);
        }
        let name = key.trim_matches(':');
        self.inner
            .by_short_name
            .get(name)
            .map(|&i| &self.inner.records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmojiVariation;

    fn thumbs_up() -> EmojiRecord {
        EmojiRecord::new("THUMBS UP SIGN", "1F44D", "People & Body", 3)
            .with_variation(EmojiVariation::new("1F44D-1F3FB"))
    }

    #[test]
    fn test_records_keep_file_order() {
        let store = EmojiStore::new(vec![
            EmojiRecord::new("GRINNING FACE", "1F600", "Smileys", 5),
            thumbs_up(),
        ])
        .expect("should build");
        let order: Vec<&str> = store.records().iter().map(|r| r.unified.as_str()).collect();
        assert_eq!(order, vec!["1F600", "1F44D"]);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_duplicate_base_codepoint_rejected() {
        let result = EmojiStore::new(vec![
            EmojiRecord::new("GRINNING FACE", "1F600", "Smileys", 1),
            EmojiRecord::new("GRINNING FACE AGAIN", "1F600", "Smileys", 2),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateCodepoint(c)) if c == "1F600"));
    }

    #[test]
    fn test_variation_colliding_with_record_rejected() {
        let result = EmojiStore::new(vec![
            thumbs_up(),
            EmojiRecord::new("IMPOSTOR", "1F44D-1F3FB", "People", 4),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateCodepoint(_))));
    }

    #[test]
    fn test_get_only_matches_base_codepoints() {
        let store = EmojiStore::new(vec![thumbs_up()]).expect("should build");
        assert!(store.get("1f44d").is_some());
        assert!(store.get("1F44D-1F3FB").is_none());
    }

    #[test]
    fn test_find_by_codepoint_variation_and_short_name() {
        let store = EmojiStore::new(vec![thumbs_up()]).expect("should build");
        assert_eq!(store.find("1F44D").map(|r| r.unified.as_str()), Some("1F44D"));
        assert_eq!(
            store.find("1f44d-1f3fb").map(|r| r.unified.as_str()),
            Some("1F44D")
        );
        assert!(store.find("thumbs_up_sign").is_some());
        assert!(store.find(":thumbs_up_sign:").is_some());
        assert!(store.find("nope").is_none());
    }

    #[test]
    fn test_malformed_json() {
        let result = EmojiStore::from_json("[{\"name\": 1}]");
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = EmojiStore::load("/definitely/not/here.json");
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
