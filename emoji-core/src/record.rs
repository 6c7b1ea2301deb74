//! Emoji records as defined by the emoji-datasource table.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::EmojiError;

/// Image sets an emoji may be available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple Color Emoji.
    Apple,
    /// Noto Color Emoji.
    Google,
    /// Twemoji.
    #[default]
    Twitter,
    /// Facebook emoji set.
    Facebook,
}

impl Platform {
    /// Lowercase name as used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = EmojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" => Ok(Self::Apple),
            "google" => Ok(Self::Google),
            "twitter" | "twemoji" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            _ => Err(EmojiError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Per-platform image availability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Availability {
    /// Image present in the Apple set.
    pub has_img_apple: bool,
    /// Image present in the Google set.
    pub has_img_google: bool,
    /// Image present in the Twitter set.
    pub has_img_twitter: bool,
    /// Image present in the Facebook set.
    pub has_img_facebook: bool,
}

impl Availability {
    /// Availability on every platform.
    #[must_use]
    pub fn all() -> Self {
        Self {
            has_img_apple: true,
            has_img_google: true,
            has_img_twitter: true,
            has_img_facebook: true,
        }
    }

    /// Whether an image exists for `platform`.
    #[must_use]
    pub fn on(&self, platform: Platform) -> bool {
        match platform {
            Platform::Apple => self.has_img_apple,
            Platform::Google => self.has_img_google,
            Platform::Twitter => self.has_img_twitter,
            Platform::Facebook => self.has_img_facebook,
        }
    }
}

/// A skin-tone (or other) alternate rendering of a base record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiVariation {
    /// Codepoint sequence of this variation.
    pub unified: String,
    /// Sprite sheet image file name.
    #[serde(default)]
    pub image: String,
    /// Sprite sheet column.
    #[serde(default)]
    pub sheet_x: u32,
    /// Sprite sheet row.
    #[serde(default)]
    pub sheet_y: u32,
    /// Emoji version the variation was added in.
    #[serde(default)]
    pub added_in: String,
    /// Platform availability.
    #[serde(flatten)]
    pub availability: Availability,
}

impl EmojiVariation {
    /// Create a variation available everywhere.
    #[must_use]
    pub fn new(unified: impl Into<String>) -> Self {
        Self {
            unified: unified.into(),
            image: String::new(),
            sheet_x: 0,
            sheet_y: 0,
            added_in: String::new(),
            availability: Availability::all(),
        }
    }
}

/// One glyph defined by the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// Canonical display name, usually upper case.
    pub name: String,
    /// Hyphen-separated hex codepoint sequence; unique key.
    pub unified: String,
    /// Unqualified codepoint sequence, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_qualified: Option<String>,
    /// Sprite sheet image file name.
    #[serde(default)]
    pub image: String,
    /// Sprite sheet column.
    #[serde(default)]
    pub sheet_x: u32,
    /// Sprite sheet row.
    #[serde(default)]
    pub sheet_y: u32,
    /// Primary short name.
    pub short_name: String,
    /// All short names (aliases).
    pub short_names: Vec<String>,
    /// ASCII emoticon, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// All ASCII emoticons, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<String>>,
    /// Category (tab) name.
    pub category: String,
    /// Subcategory name.
    pub subcategory: String,
    /// Global ordering key.
    pub sort_order: u32,
    /// Emoji version the record was added in.
    #[serde(default)]
    pub added_in: String,
    /// Platform availability.
    #[serde(flatten)]
    pub availability: Availability,
    /// Skin-tone variations keyed by modifier, in dataset order.
    #[serde(
        rename = "skin_variations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub variations: Option<IndexMap<String, Option<EmojiVariation>>>,
    /// Codepoint this record obsoletes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsoletes: Option<String>,
    /// Codepoint that obsoletes this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsoleted_by: Option<String>,
}

impl EmojiRecord {
    /// Create a minimal record available on every platform.
    ///
    /// The short name is derived from the name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unified: impl Into<String>,
        category: impl Into<String>,
        sort_order: u32,
    ) -> Self {
        let name = name.into();
        let short_name = name.to_lowercase().replace(' ', "_");
        Self {
            unified: unified.into(),
            non_qualified: None,
            image: String::new(),
            sheet_x: 0,
            sheet_y: 0,
            short_names: vec![short_name.clone()],
            short_name,
            text: None,
            texts: None,
            category: category.into(),
            subcategory: String::new(),
            sort_order,
            added_in: String::new(),
            availability: Availability::all(),
            variations: None,
            obsoletes: None,
            obsoleted_by: None,
            name,
        }
    }

    /// Set the availability flags.
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Append a skin-tone variation keyed by its own codepoint.
    #[must_use]
    pub fn with_variation(mut self, variation: EmojiVariation) -> Self {
        self.variations
            .get_or_insert_with(IndexMap::new)
            .insert(variation.unified.clone(), Some(variation));
        self
    }

    /// Dataset variations in key order, skipping null entries.
    pub fn variations(&self) -> impl Iterator<Item = &EmojiVariation> {
        self.variations
            .iter()
            .flat_map(IndexMap::values)
            .filter_map(Option::as_ref)
    }

    /// Whether the record has at least one real variation.
    #[must_use]
    pub fn has_variations(&self) -> bool {
        self.variations().next().is_some()
    }

    /// Whether `unified` names this record or one of its variations.
    #[must_use]
    pub fn owns_codepoint(&self, unified: &str) -> bool {
        self.unified.eq_ignore_ascii_case(unified)
            || self
                .variations()
                .any(|v| v.unified.eq_ignore_ascii_case(unified))
    }

    /// Whether the record has an image on `platform`.
    #[must_use]
    pub fn available_on(&self, platform: Platform) -> bool {
        self.availability.on(platform)
    }

    /// Title-cased display name ("GRINNING FACE" becomes "Grinning Face").
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .to_lowercase()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Variation-shaped copy of the record itself.
    #[must_use]
    pub fn as_variation(&self) -> EmojiVariation {
        EmojiVariation {
            unified: self.unified.clone(),
            image: self.image.clone(),
            sheet_x: self.sheet_x,
            sheet_y: self.sheet_y,
            added_in: self.added_in.clone(),
            availability: self.availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMBS_UP: &str = r#"{
        "name": "THUMBS UP SIGN",
        "unified": "1F44D",
        "non_qualified": null,
        "image": "1f44d.png",
        "sheet_x": 12,
        "sheet_y": 25,
        "short_name": "+1",
        "short_names": ["+1", "thumbsup"],
        "text": null,
        "texts": null,
        "category": "People & Body",
        "subcategory": "hand-fingers-closed",
        "sort_order": 185,
        "added_in": "0.6",
        "has_img_apple": true,
        "has_img_google": true,
        "has_img_twitter": true,
        "has_img_facebook": true,
        "skin_variations": {
            "1F3FD": {
                "unified": "1F44D-1F3FD",
                "image": "1f44d-1f3fd.png",
                "sheet_x": 12, "sheet_y": 28, "added_in": "1.0",
                "has_img_apple": true, "has_img_google": true,
                "has_img_twitter": true, "has_img_facebook": true
            },
            "1F3FB": {
                "unified": "1F44D-1F3FB",
                "image": "1f44d-1f3fb.png",
                "sheet_x": 12, "sheet_y": 26, "added_in": "1.0",
                "has_img_apple": true, "has_img_google": true,
                "has_img_twitter": true, "has_img_facebook": false
            }
        }
    }"#;

    #[test]
    fn test_deserialize_dataset_record() {
        let record: EmojiRecord = serde_json::from_str(THUMBS_UP).expect("should parse");
        assert_eq!(record.unified, "1F44D");
        assert_eq!(record.short_name, "+1");
        assert_eq!(record.sort_order, 185);
        assert!(record.available_on(Platform::Twitter));
        assert!(record.has_variations());
    }

    #[test]
    fn test_variations_keep_dataset_key_order() {
        let record: EmojiRecord = serde_json::from_str(THUMBS_UP).expect("should parse");
        let keys: Vec<&str> = record.variations().map(|v| v.unified.as_str()).collect();
        assert_eq!(keys, vec!["1F44D-1F3FD", "1F44D-1F3FB"]);
        assert!(!record.variations().nth(1).expect("second").availability.has_img_facebook);
    }

    #[test]
    fn test_null_variation_entries_are_skipped() {
        let mut record = EmojiRecord::new("WAVING HAND SIGN", "1F44B", "People & Body", 160);
        record.variations = Some(IndexMap::from([("1F3FB".to_string(), None)]));
        assert!(!record.has_variations());
        assert_eq!(record.variations().count(), 0);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let result: Result<EmojiRecord, _> =
            serde_json::from_str(r#"{"name": "X", "unified": "1F600"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!("Twitter".parse::<Platform>().expect("platform"), Platform::Twitter);
        assert_eq!("twemoji".parse::<Platform>().expect("platform"), Platform::Twitter);
        assert_eq!("apple".parse::<Platform>().expect("platform"), Platform::Apple);
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(EmojiError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_display_name() {
        let record = EmojiRecord::new("GRINNING FACE WITH SMILING EYES", "1F601", "Smileys", 2);
        assert_eq!(record.display_name(), "Grinning Face With Smiling Eyes");

        let record = EmojiRecord::new("flag: United States", "1F1FA-1F1F8", "Flags", 9);
        assert_eq!(record.display_name(), "Flag: United States");
    }

    #[test]
    fn test_owns_codepoint() {
        let record = EmojiRecord::new("THUMBS UP SIGN", "1F44D", "People", 3)
            .with_variation(EmojiVariation::new("1F44D-1F3FB"));
        assert!(record.owns_codepoint("1F44D"));
        assert!(record.owns_codepoint("1f44d-1f3fb"));
        assert!(!record.owns_codepoint("1F600"));
    }

    #[test]
    fn test_as_variation_copies_flags() {
        let availability = Availability {
            has_img_twitter: true,
            ..Availability::default()
        };
        let record =
            EmojiRecord::new("GRINNING FACE", "1F600", "Smileys", 1).with_availability(availability);
        let synthetic = record.as_variation();
        assert_eq!(synthetic.unified, "1F600");
        assert_eq!(synthetic.availability, availability);
    }
}
