//! Reqwest-backed employee directory adapter.
//!
//! This adapter owns transport details only: query serialisation, bearer
//! auth, timeout, HTTP error mapping, and JSON decoding into domain records.

mod dto;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use query_state::{DEFAULT_PAGE_LIMIT, Page, QueryState};
use reqwest::{Client, StatusCode, Url};

use self::dto::{ErrorBodyDto, PageBodyDto};
use crate::domain::auth::SessionToken;
use crate::domain::ports::{EmployeeDirectory, EmployeeDirectoryError};
use crate::domain::{Employee, NewEmployee};

/// HTTP adapter for one directory deployment.
///
/// The base URL should carry a trailing slash when it includes a path
/// segment (`https://host/api/`), so the `employees` resource joins under
/// it rather than replacing it.
pub struct DirectoryHttpClient {
    client: Client,
    base_url: Url,
    token: RwLock<SessionToken>,
}

impl DirectoryHttpClient {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: SessionToken,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: RwLock::new(token),
        })
    }

    /// Swap the bearer token after a re-login, without rebuilding the
    /// adapter shared across the engine.
    pub fn update_token(&self, token: SessionToken) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token;
    }

    fn bearer(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .expose()
            .to_owned()
    }

    fn employees_url(&self) -> Result<Url, EmployeeDirectoryError> {
        self.base_url.join("employees").map_err(|error| {
            EmployeeDirectoryError::transport(format!("invalid employees endpoint: {error}"))
        })
    }
}

#[async_trait]
impl EmployeeDirectory for DirectoryHttpClient {
    async fn fetch_page(
        &self,
        query: &QueryState,
    ) -> Result<Page<Employee>, EmployeeDirectoryError> {
        let mut url = self.employees_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_pairs() {
                pairs.append_pair(&key, &value);
            }
            pairs.append_pair("limit", &DEFAULT_PAGE_LIMIT.to_string());
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(self.bearer())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: PageBodyDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            EmployeeDirectoryError::decode(format!("invalid employee page payload: {error}"))
        })?;
        Ok(decoded.into_page())
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, EmployeeDirectoryError> {
        let response = self
            .client
            .post(self.employees_url()?)
            .bearer_auth(self.bearer())
            .json(employee)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            EmployeeDirectoryError::decode(format!("invalid created-employee payload: {error}"))
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> EmployeeDirectoryError {
    EmployeeDirectoryError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EmployeeDirectoryError {
    let parsed = serde_json::from_slice::<ErrorBodyDto>(body).unwrap_or_default();
    EmployeeDirectoryError::rejected(status.as_u16(), parsed.into_message(status))
}
