//! Wire DTOs for the employee directory HTTP API.
//!
//! The read endpoint has been observed answering with two shapes: a
//! `{ data, total, ... }` envelope and a bare record array. Both are mapped
//! into the canonical [`Page`] here, in one place, so the tolerance logic
//! has one set of tests.

use query_state::Page;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::Employee;

/// Either wire shape returned by `GET /employees`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum PageBodyDto {
    /// Paginating servers wrap records and echo the total (plus page/limit
    /// fields this client ignores).
    Envelope {
        data: Vec<Employee>,
        #[serde(default)]
        total: Option<u64>,
    },
    /// Older deployments answer with the records alone.
    Bare(Vec<Employee>),
}

impl PageBodyDto {
    /// Normalize into the canonical envelope.
    ///
    /// An absent `total` defaults to the returned array's length. This
    /// under-counts when the server paginates but omits the total — a known
    /// approximation kept until the server contract says otherwise.
    pub(super) fn into_page(self) -> Page<Employee> {
        match self {
            Self::Envelope { data, total } => {
                let total = total.unwrap_or_else(|| data.len() as u64);
                Page::new(data, total)
            }
            Self::Bare(records) => {
                let total = records.len() as u64;
                Page::new(records, total)
            }
        }
    }
}

/// Optional JSON payload carried on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorBodyDto {
    /// Extract the richest available message: body `message`, then body
    /// `detail`, then the status line.
    pub(super) fn into_message(self, status: StatusCode) -> String {
        self.message
            .filter(|text| !text.is_empty())
            .or_else(|| self.detail.filter(|text| !text.is_empty()))
            .unwrap_or_else(|| format!("status {}", status.as_u16()))
    }
}
