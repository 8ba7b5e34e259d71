//! Fixed-size pagination with wrap-around navigation.

use serde::{Deserialize, Serialize};

/// Rows per page in the exposure tables.
pub const PAGE_SIZE: usize = 10;

/// Page cursor over a row set.
///
/// Navigation wraps: previous from the first page lands on the last page,
/// next from the last page lands on the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    page: usize,
    total_rows: usize,
}

impl Pager {
    /// Creates a pager positioned on the first page.
    #[must_use]
    pub fn new(total_rows: usize) -> Self {
        Self {
            page: 0,
            total_rows,
        }
    }

    /// Current zero-based page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty row set still has one (empty) page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total_rows.div_ceil(PAGE_SIZE).max(1)
    }

    /// Advances one page, wrapping from the last page to the first.
    pub fn next(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }

    /// Steps back one page, wrapping from the first page to the last.
    pub fn prev(&mut self) {
        let count = self.page_count();
        self.page = (self.page + count - 1) % count;
    }

    /// The current page's slice of `rows`.
    ///
    /// `rows` must be the row set the pager was sized for.
    #[must_use]
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.page * PAGE_SIZE).min(rows.len());
        let end = (start + PAGE_SIZE).min(rows.len());
        &rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(Pager::new(0).page_count(), 1);
        assert_eq!(Pager::new(10).page_count(), 1);
        assert_eq!(Pager::new(11).page_count(), 2);
        assert_eq!(Pager::new(25).page_count(), 3);
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut pager = Pager::new(25);
        pager.next();
        pager.next();
        assert_eq!(pager.current_page(), 2);
        pager.next();
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut pager = Pager::new(25);
        pager.prev();
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn test_slice() {
        let rows: Vec<usize> = (0..25).collect();
        let mut pager = Pager::new(rows.len());

        assert_eq!(pager.slice(&rows), (0..10).collect::<Vec<_>>().as_slice());
        pager.next();
        assert_eq!(pager.slice(&rows), (10..20).collect::<Vec<_>>().as_slice());
        pager.next();
        assert_eq!(pager.slice(&rows), (20..25).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<usize> = vec![];
        let mut pager = Pager::new(0);

        assert!(pager.slice(&rows).is_empty());
        pager.next();
        assert_eq!(pager.current_page(), 0);
        pager.prev();
        assert_eq!(pager.current_page(), 0);
    }
}
