use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Largest page size a caller may request.
pub const MAX_ITEMS_PER_PAGE: usize = 50;

/// Number of page links rendered around the current page.
const VISIBLE_PAGE_LINKS: usize = 5;

/// Page number (1-based) and page size requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Number of rows to skip before the requested page starts. Saturates at
    /// `usize::MAX` for pages far past any real catalog.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// One page of items together with the data needed to render page links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    /// Window of page numbers to link to, centred on `page` where possible.
    pub pages: Vec<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        let pages = page_window(page, total_pages);
        Self {
            items,
            page,
            total_pages,
            pages,
        }
    }
}

fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut start = page
        .saturating_sub(VISIBLE_PAGE_LINKS / 2)
        .clamp(1, total_pages);
    let end = (start + VISIBLE_PAGE_LINKS - 1).min(total_pages);

    if end - start + 1 < VISIBLE_PAGE_LINKS {
        start = end.saturating_sub(VISIBLE_PAGE_LINKS - 1).max(1);
    }

    (start..=end).collect()
}
