//! Download planning: turning a selection into a request URL and file name.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::glyph::{svg_url, DEFAULT_CDN_BASE};
use crate::{EmojiError, EmojiRecord, EmojiResult, ImageFormat, SelectionState};

/// Default rasterization service.
pub const DEFAULT_CONVERSION_ENDPOINT: &str = "https://backend.downloademoji.dev";

/// Where images come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Base of the SVG asset tree.
    pub cdn_base: String,
    /// Service that converts an SVG into a raster image.
    pub conversion_endpoint: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            conversion_endpoint: DEFAULT_CONVERSION_ENDPOINT.to_string(),
        }
    }
}

/// A fully resolved download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadPlan {
    /// Codepoint of the variation being downloaded.
    pub codepoint: String,
    /// SVG asset for that codepoint.
    pub source_url: String,
    /// URL to GET; equals `source_url` for SVG output.
    pub request_url: String,
    /// Output format.
    pub format: ImageFormat,
    /// Output width and height, absent for SVG.
    pub size: Option<u32>,
    /// File name to save as.
    pub file_name: String,
}

impl DownloadPlan {
    /// Resolve the download for the open emoji.
    ///
    /// `record` must be the emoji whose key the selection holds.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::DownloadUnavailable`] if the selection does not
    /// allow a download, [`EmojiError::EmojiNotFound`] if `record` is not the
    /// open emoji, [`EmojiError::GlyphResolution`] if the codepoint cannot be
    /// resolved, and [`EmojiError::InvalidUrl`] for a malformed conversion
    /// endpoint.
    pub fn new(
        record: &EmojiRecord,
        selection: &SelectionState,
        endpoints: &Endpoints,
    ) -> EmojiResult<Self> {
        if let Some(reason) = selection.download_blocker() {
            return Err(EmojiError::DownloadUnavailable(reason));
        }
        if selection.selected_record_key() != Some(record.unified.as_str()) {
            return Err(EmojiError::EmojiNotFound(record.unified.clone()));
        }

        let codepoint = selection
            .selected_variation_key()
            .unwrap_or(&record.unified)
            .to_string();
        let source_url = svg_url(&endpoints.cdn_base, &codepoint)?;
        let format = selection.output_format();

        let (request_url, size) = if format.is_raster() {
            // download_blocker guarantees 1..=MAX_OUTPUT_SIZE here.
            let size = u32::try_from(selection.output_size()).map_err(|_| {
                EmojiError::DownloadUnavailable(format!(
                    "invalid size {}",
                    selection.output_size()
                ))
            })?;
            let url = conversion_url(&endpoints.conversion_endpoint, &source_url, format, size)?;
            (url, Some(size))
        } else {
            (source_url.clone(), None)
        };

        Ok(Self {
            codepoint,
            source_url,
            request_url,
            format,
            size,
            file_name: file_name(record, format),
        })
    }

    /// Whether the request goes through the conversion endpoint.
    #[must_use]
    pub fn uses_conversion(&self) -> bool {
        self.request_url != self.source_url
    }
}

/// Conversion endpoint URL for a square raster of `size` pixels.
///
/// # Errors
///
/// Returns [`EmojiError::InvalidUrl`] if `endpoint` is not a valid URL.
pub fn conversion_url(
    endpoint: &str,
    source_url: &str,
    format: ImageFormat,
    size: u32,
) -> EmojiResult<String> {
    let mut url = Url::parse(endpoint)?;
    let size = size.to_string();
    url.query_pairs_mut()
        .append_pair("imageSource", source_url)
        .append_pair("imageFormat", format.as_str())
        .append_pair("width", &size)
        .append_pair("height", &size);
    Ok(url.into())
}

/// `<short_name>.<format>`.
#[must_use]
pub fn file_name(record: &EmojiRecord, format: ImageFormat) -> String {
    format!("{}.{}", record.short_name, format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmojiVariation;

    fn thumbs_up() -> EmojiRecord {
        EmojiRecord::new("THUMBS UP SIGN", "1F44D", "People", 3)
            .with_variation(EmojiVariation::new("1F44D-1F3FB"))
    }

    fn opened(record: &EmojiRecord) -> SelectionState {
        let mut state = SelectionState::new();
        state.open_emoji(record);
        state
    }

    #[test]
    fn test_png_goes_through_conversion() {
        let record = thumbs_up();
        let state = opened(&record);
        let plan = DownloadPlan::new(&record, &state, &Endpoints::default()).expect("plan");

        assert!(plan.uses_conversion());
        assert_eq!(plan.size, Some(64));
        assert_eq!(plan.file_name, "thumbs_up_sign.png");

        let url = Url::parse(&plan.request_url).expect("valid url");
        assert_eq!(url.host_str(), Some("backend.downloademoji.dev"));
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("imageSource".to_string(), plan.source_url.clone()),
                ("imageFormat".to_string(), "png".to_string()),
                ("width".to_string(), "64".to_string()),
                ("height".to_string(), "64".to_string()),
            ]
        );
    }

    #[test]
    fn test_svg_downloads_source_directly() {
        let record = thumbs_up();
        let mut state = opened(&record);
        state.select_variation("1F44D-1F3FB").expect("variation");
        state.set_output_format(ImageFormat::Svg);

        let plan = DownloadPlan::new(&record, &state, &Endpoints::default()).expect("plan");
        assert!(!plan.uses_conversion());
        assert_eq!(plan.request_url, plan.source_url);
        assert_eq!(
            plan.source_url,
            "https://cdn.jsdelivr.net/gh/jdecked/twemoji@latest/assets/svg/1f44d-1f3fb.svg"
        );
        assert_eq!(plan.size, None);
        assert_eq!(plan.file_name, "thumbs_up_sign.svg");
    }

    #[test]
    fn test_invalid_size_blocks_plan() {
        let record = thumbs_up();
        let mut state = opened(&record);
        state.set_output_size("abc");
        assert!(matches!(
            DownloadPlan::new(&record, &state, &Endpoints::default()),
            Err(EmojiError::DownloadUnavailable(_))
        ));
    }

    #[test]
    fn test_invalid_size_blocks_svg_plan() {
        let record = EmojiRecord::new("GRINNING FACE", "1F600", "Smileys", 1);
        let mut state = opened(&record);
        state.set_output_size("abc");
        state.set_output_format(ImageFormat::Svg);
        assert!(matches!(
            DownloadPlan::new(&record, &state, &Endpoints::default()),
            Err(EmojiError::DownloadUnavailable(_))
        ));
    }

    #[test]
    fn test_wrong_record_rejected() {
        let record = thumbs_up();
        let state = opened(&record);
        let other = EmojiRecord::new("GRINNING FACE", "1F600", "Smileys", 1);
        assert!(matches!(
            DownloadPlan::new(&other, &state, &Endpoints::default()),
            Err(EmojiError::EmojiNotFound(_))
        ));
    }

    #[test]
    fn test_bad_conversion_endpoint() {
        let record = thumbs_up();
        let state = opened(&record);
        let endpoints = Endpoints {
            conversion_endpoint: "not a url".to_string(),
            ..Endpoints::default()
        };
        assert!(matches!(
            DownloadPlan::new(&record, &state, &endpoints),
            Err(EmojiError::InvalidUrl(_))
        ));
    }
}
