//! # Result Paginator/Sorter
//!
//! Holds a search result set and derives the visible page from it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ResultTable                                       │
//! │                                                                         │
//! │  load(hits) ────────► rows replaced, current sort re-applied, page 1    │
//! │  apply_sort(k, dir) ► canonical order mutated (stable), window redone   │
//! │  merge_drafts(...) ─► inline edits overlaid by row id, totals redone    │
//! │  go_* ──────────────► page clamped into [1, total_pages]                │
//! │                                                                         │
//! │  Derived, recomputed synchronously after every mutation:                │
//! │    total_pages = max(1, ceil(len / page_size))                          │
//! │    visible     = rows[(page-1)*page_size .. page*page_size)             │
//! │                                                                         │
//! │  Invariant: concatenating every page reproduces the canonical order     │
//! │  exactly once.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::{ProductHit, ProductPayload};
use crate::{DEFAULT_PAGE_SIZE, MAX_LINE_QUANTITY, MAX_UNIT_PRICE_CENTS};

// =============================================================================
// Search Row
// =============================================================================

/// One row of the search result table.
///
/// Quantity is an in-memory editing aid seeded to 1; it never round-trips to
/// the server. `total_cents` is derived and kept in step by this module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRow {
    pub id: String,
    pub name: Option<String>,
    pub product_code: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub quantity: i64,
    pub total_cents: i64,
}

impl SearchRow {
    /// Maps a server hit to a table row, seeding quantity and total.
    ///
    /// Quantity and unit price are clamped to the cart limits so row totals
    /// stay within `i64` no matter what the server sends.
    pub fn from_hit(hit: ProductHit) -> Self {
        let quantity = hit.quantity.unwrap_or(1).clamp(1, MAX_LINE_QUANTITY);
        let unit_price_cents = hit
            .unit_price_cents
            .map(|p| p.clamp(0, MAX_UNIT_PRICE_CENTS));
        let total_cents = unit_price_cents.map_or(0, |p| p.saturating_mul(quantity));
        SearchRow {
            id: hit.id,
            name: hit.name,
            product_code: hit.product_code,
            unit_price_cents,
            quantity,
            total_cents,
        }
    }

    /// Recomputes `total_cents` when the unit price is known; otherwise the
    /// prior total is retained.
    fn refresh_total(&mut self) {
        if let Some(price) = self.unit_price_cents {
            self.total_cents = price.saturating_mul(self.quantity);
        }
    }

    /// The add-to-cart payload for this row (with any draft already merged
    /// in by the caller via [`ResultTable::effective_row`]).
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            product_code: self.product_code.clone(),
            unit_price_cents: self.unit_price_cents,
            quantity: Some(self.quantity as f64),
            ..Default::default()
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// The sortable columns of the result table.
///
/// Numeric keys compare numerically with missing values coerced to 0; the
/// rest compare case-insensitively as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    ProductCode,
    UnitPrice,
    Quantity,
    Total,
}

impl SortKey {
    /// The fixed set of numeric columns.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, SortKey::UnitPrice | SortKey::Quantity | SortKey::Total)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

fn compare_rows(a: &SearchRow, b: &SearchRow, key: SortKey) -> Ordering {
    if key.is_numeric() {
        let numeric = |row: &SearchRow| match key {
            SortKey::UnitPrice => row.unit_price_cents.unwrap_or(0),
            SortKey::Quantity => row.quantity,
            SortKey::Total => row.total_cents,
            _ => unreachable!("non-numeric key in numeric branch"),
        };
        numeric(a).cmp(&numeric(b))
    } else {
        let text = |row: &SearchRow| {
            let raw = match key {
                SortKey::Name => row.name.as_deref(),
                SortKey::ProductCode => row.product_code.as_deref(),
                _ => None,
            };
            raw.unwrap_or("").to_lowercase()
        };
        text(a).cmp(&text(b))
    }
}

// =============================================================================
// Draft Patches
// =============================================================================

/// An unsaved inline edit to a row, keyed by row id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPatch {
    pub id: String,
    pub quantity: Option<i64>,
    pub unit_price_cents: Option<i64>,
}

impl DraftPatch {
    // Draft values are user-typed and clamped to the same limits as inbound
    // records before they land on a row.
    fn apply_to(&self, row: &mut SearchRow) {
        if let Some(qty) = self.quantity {
            row.quantity = qty.clamp(1, MAX_LINE_QUANTITY);
        }
        if let Some(price) = self.unit_price_cents {
            row.unit_price_cents = Some(price.clamp(0, MAX_UNIT_PRICE_CENTS));
        }
        row.refresh_total();
    }
}

// =============================================================================
// Result Table
// =============================================================================

/// The paginated, sortable search result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTable {
    rows: Vec<SearchRow>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    sort_key: SortKey,
    sort_direction: SortDirection,
}

impl ResultTable {
    /// Creates an empty table. A zero page size is treated as the default;
    /// use [`crate::validation::validate_page_size`] to reject it loudly.
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        ResultTable {
            rows: Vec::new(),
            page: 1,
            page_size,
            total_pages: 1,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
        }
    }

    /// Replaces the full row set, re-applies the current sort, and resets to
    /// page 1.
    pub fn load(&mut self, hits: Vec<ProductHit>) {
        self.rows = hits.into_iter().map(SearchRow::from_hit).collect();
        self.sort_rows();
        self.page = 1;
        self.compute_pagination();
    }

    /// Drops every row (used when the search key is blank or a request
    /// failed and the table must fall back to a safe state).
    pub fn clear(&mut self) {
        self.rows.clear();
        self.page = 1;
        self.compute_pagination();
    }

    /// Stable sort of the canonical order by `key`/`direction`.
    pub fn apply_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
        self.sort_rows();
        self.compute_pagination();
    }

    fn sort_rows(&mut self) {
        let key = self.sort_key;
        let direction = self.sort_direction;
        // Vec::sort_by is stable: equal rows keep their relative order, so
        // re-sorting an already sorted set is a no-op.
        self.rows.sort_by(|a, b| {
            let ord = compare_rows(a, b, key);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    /// Overlays saved inline edits onto matching rows and recomputes their
    /// totals. Patches with unknown ids are ignored.
    pub fn merge_drafts(&mut self, patches: &[DraftPatch]) {
        for patch in patches {
            if let Some(row) = self.rows.iter_mut().find(|r| r.id == patch.id) {
                patch.apply_to(row);
            }
        }
        self.compute_pagination();
    }

    /// The row with any unsaved draft overlaid, without mutating the table.
    ///
    /// Used by "add to cart" so an edit the user typed but never saved is
    /// still honored.
    pub fn effective_row(&self, id: &str, drafts: &[DraftPatch]) -> Option<SearchRow> {
        let row = self.rows.iter().find(|r| r.id == id)?;
        let mut effective = row.clone();
        if let Some(patch) = drafts.iter().find(|d| d.id == id) {
            patch.apply_to(&mut effective);
        }
        Some(effective)
    }

    fn compute_pagination(&mut self) {
        self.total_pages = std::cmp::max(1, self.rows.len().div_ceil(self.page_size));
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    /// The current visible page slice.
    pub fn visible_rows(&self) -> &[SearchRow] {
        let start = (self.page - 1) * self.page_size;
        let end = std::cmp::min(start + self.page_size, self.rows.len());
        if start >= self.rows.len() {
            &[]
        } else {
            &self.rows[start..end]
        }
    }

    /// The full canonical row set, in sorted order.
    pub fn rows(&self) -> &[SearchRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    // Navigation: each clamps into [1, total_pages] and no-ops at the edge.

    pub fn go_first(&mut self) {
        if !self.is_first_page() {
            self.page = 1;
        }
    }

    pub fn go_prev(&mut self) {
        if !self.is_first_page() {
            self.page -= 1;
        }
    }

    pub fn go_next(&mut self) {
        if !self.is_last_page() {
            self.page += 1;
        }
    }

    pub fn go_last(&mut self) {
        if !self.is_last_page() {
            self.page = self.total_pages;
        }
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        ResultTable::new(DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, name: &str, price: Option<i64>) -> ProductHit {
        ProductHit {
            id: id.to_string(),
            name: Some(name.to_string()),
            product_code: Some(format!("PC-{id}")),
            unit_price_cents: price,
            quantity: None,
        }
    }

    fn numbered_hits(n: usize) -> Vec<ProductHit> {
        (1..=n)
            .map(|i| hit(&format!("{i:03}"), &format!("Product {i:03}"), Some(100 * i as i64)))
            .collect()
    }

    #[test]
    fn test_load_seeds_quantity_and_total() {
        let mut table = ResultTable::new(10);
        table.load(vec![hit("1", "Widget", Some(250)), hit("2", "Gadget", None)]);

        let rows = table.rows();
        assert_eq!(rows.iter().map(|r| r.quantity).collect::<Vec<_>>(), [1, 1]);
        // priced row: 250 × 1; unpriced row: total 0
        let gadget = rows.iter().find(|r| r.name.as_deref() == Some("Gadget")).unwrap();
        assert_eq!(gadget.total_cents, 0);
        let widget = rows.iter().find(|r| r.name.as_deref() == Some("Widget")).unwrap();
        assert_eq!(widget.total_cents, 250);
    }

    #[test]
    fn test_load_resets_to_page_one() {
        let mut table = ResultTable::new(10);
        table.load(numbered_hits(25));
        table.go_last();
        assert_eq!(table.page(), 3);

        table.load(numbered_hits(5));
        assert_eq!(table.page(), 1);
        assert_eq!(table.total_pages(), 1);
    }

    #[test]
    fn test_pagination_23_rows_page_size_10() {
        let mut table = ResultTable::new(10);
        table.load(numbered_hits(23));

        assert_eq!(table.total_pages(), 3);

        table.go_last();
        assert_eq!(table.page(), 3);
        let visible: Vec<_> = table
            .visible_rows()
            .iter()
            .map(|r| r.name.clone().unwrap())
            .collect();
        assert_eq!(visible, ["Product 021", "Product 022", "Product 023"]);
    }

    #[test]
    fn test_pages_concatenate_to_full_set() {
        let mut table = ResultTable::new(10);
        table.load(numbered_hits(23));

        let mut seen = Vec::new();
        table.go_first();
        loop {
            seen.extend(table.visible_rows().iter().map(|r| r.id.clone()));
            if table.is_last_page() {
                break;
            }
            table.go_next();
        }

        let all: Vec<_> = table.rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_navigation_clamps_at_boundaries() {
        let mut table = ResultTable::new(10);
        table.load(numbered_hits(23));

        table.go_prev(); // already first
        assert_eq!(table.page(), 1);
        table.go_last();
        table.go_next(); // already last
        assert_eq!(table.page(), 3);
        table.go_first();
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let table = ResultTable::new(10);
        assert_eq!(table.total_pages(), 1);
        assert!(table.visible_rows().is_empty());
        assert!(table.is_first_page() && table.is_last_page());
    }

    #[test]
    fn test_string_sort_case_insensitive() {
        let mut table = ResultTable::new(10);
        table.load(vec![
            hit("1", "banana", Some(100)),
            hit("2", "Apple", Some(100)),
            hit("3", "cherry", Some(100)),
        ]);
        table.apply_sort(SortKey::Name, SortDirection::Asc);

        let names: Vec<_> = table.rows().iter().map(|r| r.name.clone().unwrap()).collect();
        assert_eq!(names, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_numeric_sort_with_missing_price_as_zero() {
        let mut table = ResultTable::new(10);
        table.load(vec![
            hit("1", "A", Some(300)),
            hit("2", "B", None), // missing price sorts as 0
            hit("3", "C", Some(100)),
        ]);
        table.apply_sort(SortKey::UnitPrice, SortDirection::Asc);

        let ids: Vec<_> = table.rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["2", "3", "1"]);

        table.apply_sort(SortKey::UnitPrice, SortDirection::Desc);
        let ids: Vec<_> = table.rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut table = ResultTable::new(10);
        table.load(numbered_hits(15));
        table.apply_sort(SortKey::Total, SortDirection::Desc);
        let once: Vec<_> = table.rows().iter().map(|r| r.id.clone()).collect();

        table.apply_sort(SortKey::Total, SortDirection::Desc);
        let twice: Vec<_> = table.rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_drafts_recomputes_total() {
        let mut table = ResultTable::new(10);
        table.load(vec![hit("1", "Widget", Some(250)), hit("2", "Gadget", None)]);

        table.merge_drafts(&[
            DraftPatch {
                id: "1".to_string(),
                quantity: Some(4),
                ..Default::default()
            },
            DraftPatch {
                id: "2".to_string(),
                quantity: Some(3),
                ..Default::default()
            },
            DraftPatch {
                id: "missing".to_string(),
                quantity: Some(9),
                ..Default::default()
            },
        ]);

        let widget = table.rows().iter().find(|r| r.id == "1").unwrap();
        assert_eq!(widget.quantity, 4);
        assert_eq!(widget.total_cents, 1000);

        // no unit price ⇒ quantity updates but the prior total is retained
        let gadget = table.rows().iter().find(|r| r.id == "2").unwrap();
        assert_eq!(gadget.quantity, 3);
        assert_eq!(gadget.total_cents, 0);
    }

    #[test]
    fn test_extreme_inbound_values_clamped() {
        let mut table = ResultTable::new(10);
        table.load(vec![ProductHit {
            id: "1".to_string(),
            name: Some("Absurd".to_string()),
            product_code: Some("AB1".to_string()),
            unit_price_cents: Some(i64::MAX),
            quantity: Some(i64::MAX),
        }]);

        let row = &table.rows()[0];
        assert_eq!(row.unit_price_cents, Some(MAX_UNIT_PRICE_CENTS));
        assert_eq!(row.quantity, MAX_LINE_QUANTITY);
        assert_eq!(row.total_cents, MAX_UNIT_PRICE_CENTS * MAX_LINE_QUANTITY);

        // draft edits go through the same clamps
        table.merge_drafts(&[DraftPatch {
            id: "1".to_string(),
            quantity: Some(i64::MAX),
            unit_price_cents: Some(-5),
        }]);
        let row = &table.rows()[0];
        assert_eq!(row.unit_price_cents, Some(0));
        assert_eq!(row.quantity, MAX_LINE_QUANTITY);
        assert_eq!(row.total_cents, 0);
    }

    #[test]
    fn test_effective_row_overlays_unsaved_draft() {
        let mut table = ResultTable::new(10);
        table.load(vec![hit("1", "Widget", Some(250))]);

        let drafts = vec![DraftPatch {
            id: "1".to_string(),
            quantity: Some(5),
            ..Default::default()
        }];
        let row = table.effective_row("1", &drafts).unwrap();
        assert_eq!(row.quantity, 5);
        assert_eq!(row.total_cents, 1250);

        // the table itself is untouched
        assert_eq!(table.rows()[0].quantity, 1);
        assert!(table.effective_row("nope", &drafts).is_none());
    }

    #[test]
    fn test_to_payload_carries_row_fields() {
        let row = SearchRow::from_hit(hit("1", "Widget", Some(250)));
        let payload = row.to_payload();
        assert_eq!(payload.product_code.as_deref(), Some("PC-1"));
        assert_eq!(payload.unit_price_cents, Some(250));
        assert_eq!(payload.quantity, Some(1.0));
    }
}
