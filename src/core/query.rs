//! List-query engine: search, category filter, sort, pagination
//!
//! Every listing surface in the application (all lessons, my lessons,
//! favorites, admin tables) runs the same pipeline over an in-memory
//! collection: filter by search term and category, sort, then slice one
//! page. [`evaluate`] is that pipeline as a pure function; [`QueryState`]
//! wraps a query with the page-reset rule the UI depends on.
//!
//! # Example
//! ```rust,ignore
//! let query = ListQuery {
//!     search_term: "mind".to_string(),
//!     category: CategoryFilter::Only(Category::Mindset),
//!     ..ListQuery::new()
//! };
//! let page = evaluate(&lessons, &query);
//! assert!(page.items.len() <= page.page_size);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::lesson::{CategoryFilter, Lesson};

/// Page size used by the listing pages.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Sort order for a lesson listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Most recent first. Lessons without a usable timestamp sort last.
    #[default]
    Newest,
    /// Oldest first. Lessons without a usable timestamp sort first.
    Oldest,
    /// Highest like count first.
    MostLiked,
}

/// The user-selected query over a lesson collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    /// Case-insensitive substring matched against title and description.
    /// Empty matches everything.
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    /// A query for the first page with the default page size: everything,
    /// newest first.
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            ..Self::default()
        }
    }

    /// Page number, ensuring a minimum of 1.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size, falling back to the default when set to 0.
    pub fn page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// The visible window, at most `page_size` lessons.
    pub items: Vec<Lesson>,

    /// Effective page number after clamping (starts at 1).
    pub page: usize,

    /// Window size the page was computed with.
    pub page_size: usize,

    /// Number of lessons surviving the filter, before pagination.
    pub total_matched: usize,

    /// Total number of pages; 1 even when nothing matched, so pagination
    /// controls always have a current page.
    pub total_pages: usize,

    /// Whether there is a next page.
    pub has_next: bool,

    /// Whether there is a previous page.
    pub has_prev: bool,
}

/// Evaluate a query against a lesson collection.
///
/// Pure and deterministic: the input is never mutated, and repeated calls
/// with the same arguments produce the same page in the same order (ties
/// keep their original relative order via a stable sort).
///
/// A `page` beyond the last page is clamped to the last page rather than
/// producing an empty window; an empty collection yields an empty page
/// with `total_pages = 1`.
pub fn evaluate(lessons: &[Lesson], query: &ListQuery) -> Page {
    let needle = query.search_term.to_lowercase();

    let mut matched: Vec<&Lesson> = lessons
        .iter()
        .filter(|lesson| {
            matches_search(lesson, &needle) && query.category.matches(&lesson.category)
        })
        .collect();

    match query.sort {
        SortKey::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::MostLiked => matched.sort_by(|a, b| b.likes_count.cmp(&a.likes_count)),
    }

    let page_size = query.page_size();
    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(page_size).max(1);
    let page = query.page().min(total_pages);
    let start = (page - 1) * page_size;

    let items = matched
        .iter()
        .skip(start)
        .take(page_size)
        .map(|lesson| (*lesson).clone())
        .collect();

    Page {
        items,
        page,
        page_size,
        total_matched,
        total_pages,
        has_next: start + page_size < total_matched,
        has_prev: page > 1,
    }
}

fn matches_search(lesson: &Lesson, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    lesson.title.to_lowercase().contains(needle)
        || lesson.description.to_lowercase().contains(needle)
}

/// Query holder enforcing the UI contract: changing the search term, the
/// category, or the sort order resets the page to 1, so narrowing a
/// filter can never leave the user stranded on an out-of-range page.
#[derive(Debug, Clone)]
pub struct QueryState {
    query: ListQuery,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            query: ListQuery::new(),
        }
    }

    /// The current query.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Update the search term; resets to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.query.page = 1;
    }

    /// Update the category filter; resets to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
        self.query.page = 1;
    }

    /// Update the sort order; resets to page 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.query.page = 1;
    }

    /// Jump to a page (minimum 1; values beyond the last page are
    /// clamped at evaluation time).
    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.query.page = self.query.page().saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.query.page = self.query.page().saturating_sub(1).max(1);
    }

    /// Evaluate the current query against a collection.
    pub fn evaluate_on(&self, lessons: &[Lesson]) -> Page {
        evaluate(lessons, &self.query)
    }
}
