// Query pipeline: search -> filter -> sort -> paginate
//
// Every stage is a total function over borrowed records. Nothing here touches
// the store, so rerunning the pipeline on new view state simply replaces the
// previous result.

use crate::filter::Filter;
use crate::record::Record;
use crate::view::{SortSpec, ViewState};
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Range;

/// Page metadata for a derived list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page after clamping, 1-based
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Number of records that survived search and filters
    pub total: usize,
}

impl Pagination {
    /// Clamp `requested_page` into `[1, page_count]`
    ///
    /// A page size of 0 is treated as 1.
    pub fn new(total: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = total.div_ceil(page_size).max(1);
        let page = requested_page.clamp(1, page_count);
        Self {
            page,
            page_count,
            page_size,
            total,
        }
    }

    /// Index range of the current page within the full result
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// The page a list screen renders
#[derive(Debug, Clone)]
pub struct VisibleSlice<'a, R> {
    pub items: Vec<&'a R>,
    pub pagination: Pagination,
}

impl<R> VisibleSlice<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derive the visible page from the full collection and the view state
pub fn compute_visible_slice<'a, R: Record>(
    records: &'a [R],
    view: &ViewState,
    page_size: usize,
) -> VisibleSlice<'a, R> {
    let matched = apply_query(records, view);
    let pagination = Pagination::new(matched.len(), page_size, view.page());
    let items = matched[pagination.range()].to_vec();
    VisibleSlice { items, pagination }
}

/// Search, filter and sort without paginating
///
/// This is the list exports and row selection operate on.
pub fn apply_query<'a, R: Record>(records: &'a [R], view: &ViewState) -> Vec<&'a R> {
    let searched = search_stage(records.iter(), view.search());
    let mut filtered = filter_stage(searched, &view.active_filters());
    sort_stage(&mut filtered, view.sort());
    filtered
}

/// Case-insensitive substring search over each record's search fields
///
/// Blank search text keeps every record.
pub fn search_stage<'a, R, I>(records: I, text: &str) -> Vec<&'a R>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| matches_search(*record, &needle))
        .collect()
}

/// Check one record against an already lower-cased needle
pub fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keep records matching every filter
pub fn filter_stage<'a, R: Record>(records: Vec<&'a R>, filters: &[Filter]) -> Vec<&'a R> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| {
            let fields = record.indexed_fields();
            filters.iter().all(|filter| filter.matches(&fields))
        })
        .collect()
}

/// Order records by the active sort key; no key keeps collection order
pub fn sort_stage<R: Record>(records: &mut [&R], spec: Option<&SortSpec>) {
    if let Some(spec) = spec {
        records.sort_by(|a, b| compare_records(*a, *b, spec));
    }
}

/// Strict total order on records for `spec`
///
/// Ties on the sort value fall back to the id, and the direction is applied to
/// the whole comparison, so descending is exactly ascending reversed.
pub fn compare_records<R: Record>(a: &R, b: &R, spec: &SortSpec) -> Ordering {
    let ordering = a
        .sort_value(&spec.field)
        .total_cmp(&b.sort_value(&spec.field))
        .then_with(|| a.id().cmp(b.id()));
    spec.direction.apply(ordering)
}
