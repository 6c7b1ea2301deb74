//! Text rendering of the picker: tabs, the emoji grid and the detail panel.

use emoji_core::state::MAX_OUTPUT_SIZE;
use emoji_core::{
    effective_variations, glyph, needs_variation_picker, Catalog, EmojiRecord, EmojiResult,
    Endpoints, ImageFormat, SelectionState,
};
use serde::Serialize;

/// Number of glyphs per grid row.
const GRID_COLUMNS: usize = 8;

/// One cell of the emoji grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Base codepoint.
    pub unified: String,
    /// Primary short name.
    pub short_name: String,
    /// Rendered glyph text.
    pub glyph: String,
    /// SVG asset URL.
    pub svg_url: String,
}

/// Build the grid cells of tab `index`.
///
/// Records whose glyph cannot be resolved are left out.
///
/// # Errors
///
/// Returns [`emoji_core::EmojiError::CategoryNotFound`] if `index` is out of range.
pub fn grid_cells(
    catalog: &Catalog,
    index: usize,
    endpoints: &Endpoints,
) -> EmojiResult<Vec<GridCell>> {
    let cells = catalog
        .emojis_in(index)?
        .into_iter()
        .filter_map(|record| match grid_cell(record, endpoints) {
            Ok(cell) => Some(cell),
            Err(e) => {
                tracing::debug!("Omitting {} from grid: {e}", record.unified);
                None
            }
        })
        .collect();
    Ok(cells)
}

fn grid_cell(record: &EmojiRecord, endpoints: &Endpoints) -> EmojiResult<GridCell> {
    Ok(GridCell {
        unified: record.unified.clone(),
        short_name: record.short_name.clone(),
        glyph: glyph::glyph_text(&record.unified)?,
        svg_url: glyph::svg_url(&endpoints.cdn_base, &record.unified)?,
    })
}

/// Category tabs, one per line, with the selected one marked.
#[must_use]
pub fn render_tabs(catalog: &Catalog, selected: usize) -> String {
    let lines: Vec<String> = catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let count = catalog.emojis_in(index).map_or(0, |records| records.len());
            let marker = if index == selected { '>' } else { ' ' };
            format!("{marker} [{index}] {category} ({count})")
        })
        .collect();
    to_block(&lines)
}

/// Grid of glyphs followed by a legend of short names.
#[must_use]
pub fn render_grid(cells: &[GridCell]) -> String {
    let mut lines: Vec<String> = cells
        .chunks(GRID_COLUMNS)
        .map(|row| {
            let glyphs: Vec<&str> = row.iter().map(|cell| cell.glyph.as_str()).collect();
            glyphs.join("  ")
        })
        .collect();
    if !cells.is_empty() {
        lines.push(String::new());
    }
    lines.extend(
        cells
            .iter()
            .map(|cell| format!("{}  :{}:  {}", cell.glyph, cell.short_name, cell.unified)),
    );
    to_block(&lines)
}

/// Detail panel for the open emoji.
#[must_use]
pub fn render_detail(record: &EmojiRecord, state: &SelectionState, endpoints: &Endpoints) -> String {
    let selected = state
        .selected_variation_key()
        .unwrap_or(&record.unified)
        .to_string();

    let glyph = glyph::glyph_text(&selected).unwrap_or_default();
    let mut lines = vec![
        format!("{glyph}  {}", record.display_name()),
        format!("  short names: {}", record.short_names.join(", ")),
        format!("  category:    {} / {}", record.category, record.subcategory),
        format!("  codepoint:   {selected}"),
    ];
    if let Ok(url) = glyph::svg_url(&endpoints.cdn_base, &selected) {
        lines.push(format!("  image:       {url}"));
    }

    let variations = effective_variations(record);
    if needs_variation_picker(&variations) {
        lines.push("  variations:".to_string());
        lines.extend(variations.iter().map(|variation| {
            let marker = if variation.unified == selected { '*' } else { ' ' };
            let glyph = glyph::glyph_text(&variation.unified).unwrap_or_default();
            format!("    {marker} {glyph}  {}", variation.unified)
        }));
    }

    let size = if state.size_input_enabled() {
        let flag = if state.size_is_valid() {
            String::new()
        } else {
            format!(" (invalid, must be 1..={MAX_OUTPUT_SIZE})")
        };
        format!("{}px{flag}", state.output_size())
    } else {
        "n/a".to_string()
    };
    let formats: Vec<String> = ImageFormat::ALL
        .iter()
        .map(|&f| {
            if f == state.output_format() {
                format!("[.{f}]")
            } else {
                format!(".{f}")
            }
        })
        .collect();
    let download = match state.download_blocker() {
        None => "ready".to_string(),
        Some(reason) => format!("disabled ({reason})"),
    };
    lines.push(format!("  size:        {size}"));
    lines.push(format!("  format:      {}", formats.join(" ")));
    lines.push(format!("  download:    {download}"));
    to_block(&lines)
}

/// Join lines, each terminated by a newline.
fn to_block(lines: &[String]) -> String {
    let mut block = lines.join("\n");
    if !lines.is_empty() {
        block.push('\n');
    }
    block
}
