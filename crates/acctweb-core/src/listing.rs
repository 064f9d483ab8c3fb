//! Listing transform: filter, paginate, page window and aggregate totals
//!
//! Everything here is a pure function of the collection and a [`ViewState`].
//! Aggregates are always taken over the whole collection, never the filtered
//! or paginated subset.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::CounterpartySummary;
use crate::view::ViewState;

/// Page window width used by the listing screens, also its upper bound
pub const DEFAULT_PAGE_WINDOW: usize = acctweb_config::MAX_PAGE_WINDOW;

/// Totals shown on the summary cards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountSummary {
    pub count: usize,
    pub gross_total: Decimal,
    pub settled_total: Decimal,
    pub outstanding_total: Decimal,
}

/// One rendered page of a listing
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub search: String,
    pub rows: Vec<CounterpartySummary>,
    /// Current page after clamping, 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub page_window: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    pub summary: AccountSummary,
}

/// Records whose name or external code contains `search`, ignoring case.
///
/// Order is preserved; an empty search keeps everything.
pub fn filter<'a>(records: &'a [CounterpartySummary], search: &str) -> Vec<&'a CounterpartySummary> {
    let needle = search.to_lowercase();
    records.iter().filter(|r| r.matches(&needle)).collect()
}

/// Number of pages for `len` items, never less than one
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `[(page-1)*size, page*size)` clamped to the bounds of `items`.
///
/// The page itself is not clamped: a page past the end yields an empty slice.
/// Page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Consecutive page numbers around `current`, at most `width` of them
/// and never more than [`DEFAULT_PAGE_WINDOW`].
///
/// Centred on the current page where possible and shifted to stay inside
/// `[1, total_pages]` at either end.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    let width = width.min(DEFAULT_PAGE_WINDOW);
    let current = clamp_page(current, total_pages);
    let mut start = current.saturating_sub(width / 2).max(1);
    let end = (start + width - 1).min(total_pages);
    if end - start + 1 < width {
        start = (end + 1).saturating_sub(width).max(1);
    }
    (start..=end).collect()
}

/// Count and sums over the full collection
pub fn aggregate(records: &[CounterpartySummary]) -> AccountSummary {
    records.iter().fold(
        AccountSummary::default(),
        |mut acc, r| {
            acc.count += 1;
            acc.gross_total += r.gross_amount;
            acc.settled_total += r.settled_amount;
            acc.outstanding_total += r.outstanding_balance;
            acc
        },
    )
}

/// Apply a view state to a collection
pub fn listing(records: &[CounterpartySummary], view: &ViewState, window: usize) -> Listing {
    let filtered = filter(records, view.search());
    let page_size = view.page_size().get();
    let total_pages = total_pages(filtered.len(), page_size);
    let page = clamp_page(view.page(), total_pages);

    let rows = paginate(&filtered, page, page_size)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    Listing {
        search: view.search().to_string(),
        rows,
        page,
        page_size,
        total_pages,
        filtered_count: filtered.len(),
        total_count: records.len(),
        page_window: page_window(page, total_pages, window),
        has_prev: page > 1,
        has_next: page < total_pages,
        summary: aggregate(records),
    }
}
