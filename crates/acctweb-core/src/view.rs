//! Immutable view state for a listing screen
//!
//! Each interaction (keystroke in the search box, page link, size selector)
//! produces a new [`ViewState`] instead of mutating the current one.

use std::collections::HashMap;

use acctweb_config::{PaginationConfig, PAGE_SIZE_CHOICES};
use serde::Serialize;

use crate::listing::{clamp_page, total_pages};

/// A page size taken from the allowed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Allowed page sizes and the fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizes {
    allowed: Vec<usize>,
    default: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            allowed: vec![10, 25, 50],
            default: 10,
        }
    }
}

impl PageSizes {
    /// Build from an allowed list; sizes outside 10, 25 and 50 are dropped and
    /// the default falls back to the first allowed size when it is not in the list.
    pub fn new(allowed: Vec<usize>, default: usize) -> Self {
        let allowed: Vec<usize> = allowed
            .into_iter()
            .filter(|s| PAGE_SIZE_CHOICES.contains(s))
            .collect();
        if allowed.is_empty() {
            return Self::default();
        }
        let default = if allowed.contains(&default) { default } else { allowed[0] };
        Self { allowed, default }
    }

    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(config.page_sizes.clone(), config.default_page_size)
    }

    pub fn allowed(&self) -> &[usize] {
        &self.allowed
    }

    pub fn default_size(&self) -> PageSize {
        PageSize(self.default)
    }

    /// The requested size if allowed, otherwise the default
    pub fn resolve(&self, requested: Option<usize>) -> PageSize {
        match requested {
            Some(size) if self.allowed.contains(&size) => PageSize(size),
            _ => self.default_size(),
        }
    }
}

/// Search term, page and page size of one listing screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    search: String,
    page: usize,
    page_size: PageSize,
}

impl ViewState {
    /// Initial state: no search, first page
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Build from query parameters `q`, `page` and `size`.
    ///
    /// The search text is taken as typed, surrounding whitespace included.
    /// Unparsable values fall back to the defaults; the page is clamped
    /// against the actual result later, when the listing is built.
    pub fn from_query(params: &HashMap<String, String>, sizes: &PageSizes) -> Self {
        let search = params.get("q").cloned().unwrap_or_default();
        let page = params
            .get("page")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        let page_size = sizes.resolve(params.get("size").and_then(|s| s.trim().parse().ok()));

        let view = Self::new(sizes.default_size())
            .with_page_size(page_size)
            .with_search(search);
        Self { page, ..view }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// New search term; back to the first page
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    /// Jump to `page`, clamped to the pages available for `filtered_len` rows
    pub fn with_page(self, page: usize, filtered_len: usize) -> Self {
        let pages = total_pages(filtered_len, self.page_size.get());
        Self {
            page: clamp_page(page, pages),
            ..self
        }
    }

    /// New page size; back to the first page
    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            ..self
        }
    }

    pub fn next_page(self, filtered_len: usize) -> Self {
        let page = self.page.saturating_add(1);
        self.with_page(page, filtered_len)
    }

    pub fn prev_page(self, filtered_len: usize) -> Self {
        let page = self.page.saturating_sub(1);
        self.with_page(page, filtered_len)
    }
}
