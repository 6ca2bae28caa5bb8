//! Driven port for reading and writing the remote employee collection.

use async_trait::async_trait;
use query_state::{Page, QueryState};

use crate::domain::employee::{Employee, NewEmployee};

/// Errors surfaced while calling the directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeDirectoryError {
    /// Network transport failed before a response arrived.
    #[error("directory transport failed: {message}")]
    Transport {
        /// Transport-level error text.
        message: String,
    },
    /// The directory answered with a non-success status.
    #[error("directory rejected request (status {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message already extracted from the richest
        /// available source (body `message`, then `detail`, then status).
        message: String,
    },
    /// A success response carried an undecodable body.
    #[error("directory response decode failed: {message}")]
    Decode {
        /// Decoder error text.
        message: String,
    },
}

impl EmployeeDirectoryError {
    /// Build a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a rejection carrying an already-extracted message.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Build a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// The text a user should see for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message } | Self::Decode { message } | Self::Rejected { message, .. } => {
                message.clone()
            }
        }
    }
}

/// Port for the remote employee collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Fetch one page of records matching the query.
    ///
    /// The returned envelope is already normalized from whichever wire shape
    /// the server chose; `total` falls back to the page length when the
    /// server omits it.
    async fn fetch_page(
        &self,
        query: &QueryState,
    ) -> Result<Page<Employee>, EmployeeDirectoryError>;

    /// Store a validated new record and return it as stored.
    async fn create(&self, employee: &NewEmployee) -> Result<Employee, EmployeeDirectoryError>;
}

/// Fixture implementation answering every read with an empty page and
/// refusing every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEmployeeDirectory;

#[async_trait]
impl EmployeeDirectory for FixtureEmployeeDirectory {
    async fn fetch_page(
        &self,
        _query: &QueryState,
    ) -> Result<Page<Employee>, EmployeeDirectoryError> {
        Ok(Page::empty())
    }

    async fn create(&self, _employee: &NewEmployee) -> Result<Employee, EmployeeDirectoryError> {
        Err(EmployeeDirectoryError::rejected(
            405,
            "fixture directory is read-only",
        ))
    }
}
