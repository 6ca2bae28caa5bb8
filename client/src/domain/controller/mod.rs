//! The view-state machine driving the record browser.
//!
//! The controller exclusively owns the authoritative [`QueryState`]; no
//! other component writes it. Every intent except a sort-column click
//! computes the next query, writes the durable subset back to the address
//! bar, and triggers a fetch. Sorting only reorders the already-fetched
//! page; the read endpoint accepts no sort parameter, so ordering is
//! page-local by contract.

use std::sync::Arc;

use query_state::{DEFAULT_PAGE_LIMIT, FilterBy, Page, QueryState, SortKey};
use tracing::warn;

use super::auth::{AuthContext, SessionRole};
use super::employee::{Employee, EmployeeDraft};
use super::loader::{LoadOutcome, PageLoader};
use super::ports::{AddressBar, EmployeeDirectory};
use super::sort;
use super::submission::{EmployeeSubmission, SubmitError};

#[cfg(test)]
mod tests;

/// Where the controller is in its fetch lifecycle.
///
/// Every entry into `Fetching` has a guaranteed terminal transition: fresh
/// success lands in `Idle`, failure in `Error`, and a stale resolution is
/// superseded by the newer fetch's own transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight; the view reflects the last fresh page.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The last fetch failed; cleared by the next intent, never auto-retried.
    Error {
        /// Human-readable failure text.
        message: String,
    },
}

/// Central state machine for the record browser.
pub struct DashboardController<D, A> {
    query: QueryState,
    page: Page<Employee>,
    phase: Phase,
    role: SessionRole,
    loader: PageLoader<D>,
    submission: EmployeeSubmission<D>,
    address_bar: A,
}

impl<D: EmployeeDirectory, A: AddressBar> DashboardController<D, A> {
    /// Build a controller, deriving the initial query from the address bar.
    ///
    /// No fetch happens until [`DashboardController::mount`].
    #[must_use]
    pub fn new(directory: Arc<D>, address_bar: A, auth: &AuthContext) -> Self {
        let query = QueryState::from_pairs(&address_bar.read());
        Self {
            query,
            page: Page::empty(),
            phase: Phase::Idle,
            role: auth.role(),
            loader: PageLoader::new(Arc::clone(&directory)),
            submission: EmployeeSubmission::new(directory, auth),
            address_bar,
        }
    }

    /// Run the initial fetch for the mounted query.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Update the search term; returns to the first page.
    pub async fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.first_page_and_fetch().await;
    }

    /// Re-run the current search from the first page.
    pub async fn submit_search(&mut self) {
        self.first_page_and_fetch().await;
    }

    /// Change the filter dimension; returns to the first page.
    pub async fn set_filter_by(&mut self, filter_by: FilterBy) {
        self.query.filter_by = filter_by;
        self.first_page_and_fetch().await;
    }

    /// Navigate to an explicit page — the only intent that changes `page`
    /// without resetting it.
    pub async fn set_page(&mut self, page: u32) {
        self.query.page = page.max(1);
        self.sync_and_fetch().await;
    }

    /// Clear search and filter and return to the first page. The sort
    /// selection is view state and survives a reset.
    pub async fn reset(&mut self) {
        self.query = QueryState {
            sort: self.query.sort,
            ..QueryState::default()
        };
        self.sync_and_fetch().await;
    }

    /// Apply a sort-column click. Never fetches and never touches the
    /// address bar: sorting is local to the fetched page.
    pub fn set_sort(&mut self, key: SortKey) {
        self.query.sort.toggle(key);
    }

    /// Re-initialise after a login: replace the session capability, re-read
    /// the query from the address bar, and re-run the initial fetch.
    ///
    /// The transport credential is owned by the directory adapter, not the
    /// controller; refresh it there (see `DirectoryHttpClient::update_token`)
    /// before calling this, or outbound requests keep the stale bearer.
    pub async fn rehydrate(&mut self, auth: &AuthContext) {
        self.role = auth.role();
        self.submission.set_role(auth.role());
        self.query = QueryState::from_pairs(&self.address_bar.read());
        self.refresh().await;
    }

    /// Validate and store a new record; on success the current query is
    /// re-fetched so the record becomes visible if it lands on this page.
    ///
    /// # Errors
    ///
    /// See [`EmployeeSubmission::submit`]. On error the caller keeps the
    /// draft.
    pub async fn add_employee(&mut self, draft: &EmployeeDraft) -> Result<Employee, SubmitError> {
        let created = self.submission.submit(draft).await?;
        self.refresh().await;
        Ok(created)
    }

    /// The authoritative query.
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Total records matching the query across all pages.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.page.total
    }

    /// Number of pages at the fixed page limit.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.page.total_pages(DEFAULT_PAGE_LIMIT)
    }

    /// The fetched page ordered by the active sort selection. Produces a
    /// fresh list; the cached page is never reordered in place.
    #[must_use]
    pub fn sorted_employees(&self) -> Vec<Employee> {
        sort::sorted(&self.page.records, self.query.sort)
    }

    /// Whether this session may open the add-record flow.
    #[must_use]
    pub fn can_add_employees(&self) -> bool {
        self.role.is_admin()
    }

    async fn first_page_and_fetch(&mut self) {
        self.query.page = 1;
        self.sync_and_fetch().await;
    }

    async fn sync_and_fetch(&mut self) {
        self.address_bar.replace(self.query.to_pairs());
        self.refresh().await;
    }

    async fn refresh(&mut self) {
        self.phase = Phase::Fetching;
        match self.loader.load(&self.query).await {
            Ok(LoadOutcome::Loaded(page)) => {
                self.page = page;
                self.phase = Phase::Idle;
            }
            Ok(LoadOutcome::Stale) => {}
            Err(error) => {
                warn!(%error, "employee page fetch failed");
                self.page = Page::empty();
                self.phase = Phase::Error {
                    message: error.user_message(),
                };
            }
        }
    }
}
