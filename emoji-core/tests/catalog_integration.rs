//! Catalog Integration Tests
//!
//! Loads a trimmed copy of the emoji-datasource table and walks the flow a
//! front end goes through:
//! - Tab order and per-tab grids
//! - Opening an emoji and picking a variation
//! - Planning SVG and raster downloads

use std::io::Write;

use emoji_core::{
    effective_variations, glyph, needs_variation_picker, Catalog, CatalogConfig, DownloadPlan,
    EmojiStore, Endpoints, ImageFormat, Platform, SelectionState,
};

const FIXTURE: &str = include_str!("fixtures/emoji_sample.json");

fn catalog() -> Catalog {
    let store = EmojiStore::from_json(FIXTURE).expect("fixture should parse");
    Catalog::new(store, &CatalogConfig::default())
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_tabs_follow_first_sorted_occurrence() {
    let catalog = catalog();
    assert_eq!(
        catalog.categories(),
        ["Smileys & Emotion", "People & Body", "Animals & Nature"]
    );
}

#[test]
fn test_grid_order_and_exclusions() {
    let catalog = catalog();
    let order: Vec<&str> = catalog.sorted().map(|r| r.short_name.as_str()).collect();
    // sort order 159 is excluded, the bags face has no Twitter image
    assert_eq!(order, vec!["grinning", "heart", "wave", "+1", "dog"]);

    let smileys: Vec<&str> = catalog
        .emojis_in(0)
        .expect("first tab")
        .iter()
        .map(|r| r.short_name.as_str())
        .collect();
    assert_eq!(smileys, vec!["grinning", "heart"]);
}

#[test]
fn test_other_platform_changes_projection() {
    let store = EmojiStore::from_json(FIXTURE).expect("fixture should parse");
    let config = CatalogConfig {
        target_platform: Platform::Apple,
        excluded_sort_orders: Vec::new(),
    };
    let catalog = Catalog::new(store, &config);
    assert_eq!(catalog.len(), 7);
    assert_eq!(
        catalog.sorted().next().map(|r| r.short_name.as_str()),
        Some("grinning")
    );
}

#[test]
fn test_store_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(FIXTURE.as_bytes()).expect("write fixture");

    let store = EmojiStore::load(file.path()).expect("should load");
    assert_eq!(store.len(), 7);
    assert_eq!(store.records()[0].short_name, "grinning");
}

#[test]
fn test_every_renderable_glyph_resolves() {
    let catalog = catalog();
    for record in catalog.sorted() {
        assert!(glyph::glyph_text(&record.unified).is_ok(), "{}", record.unified);
        assert!(
            glyph::svg_url(glyph::DEFAULT_CDN_BASE, &record.unified).is_ok(),
            "{}",
            record.unified
        );
    }
}

// ============================================================================
// Variations
// ============================================================================

#[test]
fn test_variation_lists() {
    let catalog = catalog();
    let store = catalog.store();

    let thumbs = store.find("thumbsup").expect("thumbs up");
    let variations = effective_variations(thumbs);
    let keys: Vec<&str> = variations.iter().map(|v| v.unified.as_str()).collect();
    assert_eq!(keys, vec!["1F44D", "1F44D-1F3FB", "1F44D-1F3FC"]);
    assert!(needs_variation_picker(&variations));

    let dog = store.find(":dog:").expect("dog");
    assert!(effective_variations(dog).is_empty());
}

// ============================================================================
// Selection and download planning
// ============================================================================

#[test]
fn test_open_pick_variation_and_plan_png() {
    let catalog = catalog();
    let wave = catalog.store().find("wave").expect("wave");

    let mut state = SelectionState::new();
    state.select_category(catalog.category_index("People & Body").expect("tab"));
    state.open_emoji(wave);
    state.select_variation("1F44B-1F3FF").expect("dark skin tone");
    assert_eq!(state.set_output_size("256"), 256);

    let plan = DownloadPlan::new(wave, &state, &Endpoints::default()).expect("plan");
    assert!(plan.uses_conversion());
    assert_eq!(plan.codepoint, "1F44B-1F3FF");
    assert_eq!(plan.file_name, "wave.png");
    assert!(plan.request_url.starts_with("https://backend.downloademoji.dev/?"));
    assert!(plan.request_url.contains("width=256"));
    assert!(plan.request_url.contains("height=256"));
}

#[test]
fn test_svg_plan_skips_conversion() {
    let catalog = catalog();
    let heart = catalog.store().find("heart").expect("heart");

    let mut state = SelectionState::new();
    state.open_emoji(heart);
    state.set_output_format(ImageFormat::Svg);

    let plan = DownloadPlan::new(heart, &state, &Endpoints::default()).expect("plan");
    assert!(!plan.uses_conversion());
    assert!(plan.request_url.ends_with("/svg/2764.svg"));
    assert_eq!(plan.file_name, "heart.svg");
}

#[test]
fn test_open_close_resets_selection() {
    let catalog = catalog();
    let thumbs = catalog.store().find("+1").expect("thumbs up");

    let mut state = SelectionState::new();
    state.open_emoji(thumbs);
    state.select_variation("1F44D-1F3FC").expect("variation");
    state.set_output_format(ImageFormat::Jpeg);
    state.close_emoji();

    assert_eq!(state.selected_variation_key(), state.selected_record_key());
    assert_eq!(state.output_size(), 64);
    assert_eq!(state.output_format(), ImageFormat::Png);
}
