//! Fetch orchestration with stale-response suppression.
//!
//! Overlapping fetches are possible: a new intent can fire before a prior
//! fetch settles, and network resolution order is not initiation order. Each
//! load is tagged with a monotonically increasing generation before awaiting
//! the port; on resolution, anything but the latest generation is reported
//! as stale and discarded, errors included. In-flight requests are never
//! aborted, merely ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use query_state::{DEFAULT_PAGE_LIMIT, Page, QueryState};
use tracing::{debug, warn};

use super::employee::Employee;
use super::ports::{EmployeeDirectory, EmployeeDirectoryError};

/// What a settled load means for the visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The latest-initiated fetch settled; the page replaces the view.
    Loaded(Page<Employee>),
    /// A newer fetch was initiated meanwhile; discard this resolution.
    Stale,
}

/// Issues page reads and enforces last-initiated-wins.
pub struct PageLoader<D> {
    directory: Arc<D>,
    generation: AtomicU64,
}

impl<D> PageLoader<D> {
    /// Build a loader over the directory port.
    #[must_use]
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            generation: AtomicU64::new(0),
        }
    }
}

impl<D: EmployeeDirectory> PageLoader<D> {
    /// Fetch the page the query describes.
    ///
    /// Clamps the result to [`DEFAULT_PAGE_LIMIT`] records, restoring the
    /// envelope invariant if the server over-delivers.
    ///
    /// # Errors
    ///
    /// Propagates the port error only when this load is still the latest;
    /// stale failures resolve to [`LoadOutcome::Stale`].
    pub async fn load(
        &self,
        query: &QueryState,
    ) -> Result<LoadOutcome, EmployeeDirectoryError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, page = query.page, search = %query.search, "fetching employee page");

        let resolved = self.directory.fetch_page(query).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            warn!(ticket, "discarding stale page resolution");
            return Ok(LoadOutcome::Stale);
        }

        let mut page = resolved?;
        page.truncate(DEFAULT_PAGE_LIMIT);
        debug!(ticket, records = page.records.len(), total = page.total, "page resolved");
        Ok(LoadOutcome::Loaded(page))
    }
}
