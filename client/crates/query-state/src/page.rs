//! Fetched-page envelope shared by read operations.

/// Records requested per page. The server caps the limit at 50; the client
/// always asks for this fixed size.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// One fetched page of records plus the collection-wide total.
///
/// Each fetch creates a fresh envelope; a newer fetch supersedes rather than
/// merges. Invariant (enforced by [`Page::truncate`] at the fetch boundary):
/// `records.len()` never exceeds the page limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub records: Vec<T>,
    /// Total number of records matching the query across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Build an envelope from already-normalized parts.
    #[must_use]
    pub fn new(records: Vec<T>, total: u64) -> Self {
        Self { records, total }
    }

    /// The empty page every view resets to on a failed fetch.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }

    /// Number of pages needed to show `total` records at `limit` per page.
    #[must_use]
    pub fn total_pages(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(limit))
    }

    /// Drop records beyond `limit`, restoring the page-size invariant when a
    /// server hands back more rows than requested.
    pub fn truncate(&mut self, limit: u32) {
        self.records.truncate(limit as usize);
    }
}
