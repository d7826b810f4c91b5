//! Audit log viewer state: paging plus server-side filters.

use provisio_config::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::models::{AuditLog, AuditLogFilter, ListQuery, Page};

#[derive(Debug, Clone)]
pub struct AuditLogView {
    page: u32,
    page_size: u32,
    filter: AuditLogFilter,
    total: u64,
    entries: Vec<AuditLog>,
}

impl Default for AuditLogView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl AuditLogView {
    /// `page_size` is clamped to `1..=MAX_PAGE_SIZE`, the range the backend serves.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            filter: AuditLogFilter::default(),
            total: 0,
            entries: Vec::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &AuditLogFilter {
        &self.filter
    }

    pub fn entries(&self) -> &[AuditLog] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Query for the current page and filter.
    pub fn query(&self) -> ListQuery {
        ListQuery::new().page(self.page).page_size(self.page_size)
    }

    /// Replace the filter. Any change resets paging to the first page.
    ///
    /// Returns `true` when a reload is needed.
    pub fn set_filter(&mut self, filter: AuditLogFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Store a fetched page.
    pub fn apply(&mut self, page: Page<AuditLog>) {
        self.total = page.total;
        self.entries = page.items;
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Advance one page if there is one. Returns `true` when a reload is needed.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Jump to `page` (1-based). Not clamped to `total_pages`, since the total
    /// is unknown before the first fetch.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: u64) -> Page<AuditLog> {
        Page {
            items: Vec::new(),
            total,
            page: 1,
            page_size: 10,
        }
    }

    #[test]
    fn test_paging_bounded_by_total() {
        let mut view = AuditLogView::new(10);
        view.apply(page_of(25));
        assert_eq!(view.total_pages(), 3);
        assert!(!view.previous_page());
        assert!(view.next_page());
        assert!(view.next_page());
        assert!(!view.next_page());
        assert_eq!(view.page(), 3);
        assert_eq!(view.query().page, 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = AuditLogView::new(10);
        view.apply(page_of(50));
        view.next_page();
        view.next_page();

        let filter = AuditLogFilter {
            action: Some("deployment.delete".to_string()),
            ..Default::default()
        };
        assert!(view.set_filter(filter.clone()));
        assert_eq!(view.page(), 1);
        assert!(!view.set_filter(filter));
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let mut view = AuditLogView::default();
        view.apply(page_of(0));
        assert_eq!(view.total_pages(), 1);
        assert!(!view.has_next());
    }

    #[test]
    fn test_oversized_page_size_matches_what_backend_serves() {
        let mut view = AuditLogView::new(500);
        assert_eq!(view.page_size(), MAX_PAGE_SIZE);
        assert_eq!(view.query().page_size, MAX_PAGE_SIZE);

        view.apply(Page {
            items: Vec::new(),
            total: 250,
            page: 1,
            page_size: MAX_PAGE_SIZE,
        });
        assert_eq!(view.total_pages(), 3);
        assert!(view.next_page());
        assert!(view.next_page());
        assert!(!view.next_page());
    }

    #[test]
    fn test_set_page_size_clamps_both_ends() {
        let mut view = AuditLogView::new(10);
        assert!(view.set_page_size(1000));
        assert_eq!(view.page_size(), MAX_PAGE_SIZE);
        assert!(!view.set_page_size(MAX_PAGE_SIZE + 1));
        assert!(view.set_page_size(0));
        assert_eq!(view.page_size(), 1);
    }

    #[test]
    fn test_go_to_page_before_first_fetch() {
        let mut view = AuditLogView::new(10);
        assert!(view.go_to_page(4));
        assert_eq!(view.query().page, 4);
        assert!(!view.go_to_page(4));
        assert!(view.go_to_page(0));
        assert_eq!(view.page(), 1);
    }
}
