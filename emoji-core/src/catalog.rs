//! Catalog projection: the sorted, categorized view of the emoji table.
//!
//! The free functions are pure and operate on any slice of records. The
//! [`Catalog`] type memoizes one projection of an [`EmojiStore`].

use serde::{Deserialize, Serialize};

use crate::{EmojiError, EmojiRecord, EmojiResult, EmojiStore, EmojiVariation, Platform};

/// Sort order of the eye-in-speech-bubble record, whose image is broken upstream.
pub const DEFAULT_EXCLUDED_SORT_ORDER: u32 = 159;

/// Settings that decide which records are renderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Image set whose availability flag must be set.
    pub target_platform: Platform,
    /// Sort orders that are never rendered.
    pub excluded_sort_orders: Vec<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            target_platform: Platform::Twitter,
            excluded_sort_orders: vec![DEFAULT_EXCLUDED_SORT_ORDER],
        }
    }
}

impl CatalogConfig {
    /// Whether `record` appears in the rendered catalog.
    #[must_use]
    pub fn is_renderable(&self, record: &EmojiRecord) -> bool {
        record.available_on(self.target_platform)
            && !self.excluded_sort_orders.contains(&record.sort_order)
    }
}

/// Renderable records sorted by `sort_order`.
///
/// Records sharing a sort order keep their input order.
#[must_use]
pub fn sorted_renderable<'a>(
    records: &'a [EmojiRecord],
    config: &CatalogConfig,
) -> Vec<&'a EmojiRecord> {
    renderable_order(records, config)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Positions in `records` of the renderable ones, in display order.
fn renderable_order(records: &[EmojiRecord], config: &CatalogConfig) -> Vec<usize> {
    let mut order: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| config.is_renderable(record))
        .map(|(i, _)| i)
        .collect();
    // Stable, so equal sort orders keep input order.
    order.sort_by_key(|&i| records[i].sort_order);
    order
}

/// Distinct categories in first-occurrence order.
#[must_use]
pub fn categories<'a>(sorted: &[&'a EmojiRecord]) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for &record in sorted {
        let category = record.category.as_str();
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Records of one category, in the order given.
#[must_use]
pub fn by_category<'a>(sorted: &[&'a EmojiRecord], category: &str) -> Vec<&'a EmojiRecord> {
    sorted
        .iter()
        .copied()
        .filter(|record| record.category == category)
        .collect()
}

/// The record itself followed by its variations, or nothing if it has none.
#[must_use]
pub fn effective_variations(record: &EmojiRecord) -> Vec<EmojiVariation> {
    if !record.has_variations() {
        return Vec::new();
    }
    std::iter::once(record.as_variation())
        .chain(record.variations().cloned())
        .collect()
}

/// Whether a variation list warrants showing a picker.
#[must_use]
pub fn needs_variation_picker(variations: &[EmojiVariation]) -> bool {
    variations.len() > 1
}

/// Memoized projection of a store.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: EmojiStore,
    /// Indexes into the store's records, sorted.
    sorted: Vec<usize>,
    categories: Vec<String>,
}

impl Catalog {
    /// Project `store` with `config`.
    #[must_use]
    pub fn new(store: EmojiStore, config: &CatalogConfig) -> Self {
        let records = store.records();
        let sorted = renderable_order(records, config);

        let refs: Vec<&EmojiRecord> = sorted.iter().map(|&i| &records[i]).collect();
        let categories = categories(&refs).into_iter().map(str::to_owned).collect();

        tracing::debug!(
            "Catalog projected: {} of {} records renderable on {}",
            sorted.len(),
            records.len(),
            config.target_platform
        );

        Self {
            store,
            sorted,
            categories,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &EmojiStore {
        &self.store
    }

    /// Renderable records in display order.
    pub fn sorted(&self) -> impl Iterator<Item = &EmojiRecord> {
        let records = self.store.records();
        self.sorted.iter().map(move |&i| &records[i])
    }

    /// Number of renderable records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether nothing is renderable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Category names in tab order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category name at tab `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::CategoryNotFound`] if `index` is out of range.
    pub fn category_at(&self, index: usize) -> EmojiResult<&str> {
        self.categories
            .get(index)
            .map(String::as_str)
            .ok_or(EmojiError::CategoryNotFound(index))
    }

    /// Tab index of a category name, compared case-insensitively.
    #[must_use]
    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Records shown on tab `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiError::CategoryNotFound`] if `index` is out of range.
    pub fn emojis_in(&self, index: usize) -> EmojiResult<Vec<&EmojiRecord>> {
        let category = self.category_at(index)?;
        Ok(self
            .sorted()
            .filter(|record| record.category == category)
            .collect())
    }

    /// Whether `record` made it into the projection.
    #[must_use]
    pub fn contains(&self, record: &EmojiRecord) -> bool {
        self.sorted().any(|r| r.unified == record.unified)
    }
}
