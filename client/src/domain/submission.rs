//! Validated creation of new directory records.
//!
//! Validation never reaches the network: a draft missing any field is
//! refused locally, as is a non-admin session (the server enforces the same
//! with a 403). Remote failures surface a human-readable message and leave
//! the caller's draft intact for retry.

use std::sync::Arc;

use tracing::warn;

use super::auth::{AuthContext, SessionRole};
use super::employee::{DraftValidationError, Employee, EmployeeDraft};
use super::ports::EmployeeDirectory;

/// Fallback shown when a remote failure carries no usable message.
const GENERIC_WRITE_FAILURE: &str = "Failed to add employee. Please try again.";

/// Why a submission was refused or failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// A required field is missing; no network call was made.
    #[error(transparent)]
    Validation(#[from] DraftValidationError),
    /// The session lacks the admin capability; no network call was made.
    #[error("only admins can add employees")]
    Forbidden,
    /// The directory refused or the transport failed; the draft survives.
    #[error("{message}")]
    Remote {
        /// Message extracted from the richest available source.
        message: String,
    },
}

/// Mutation gateway for new employee records.
pub struct EmployeeSubmission<D> {
    directory: Arc<D>,
    role: SessionRole,
}

impl<D> EmployeeSubmission<D> {
    /// Build a gateway bound to the session's capability.
    #[must_use]
    pub fn new(directory: Arc<D>, auth: &AuthContext) -> Self {
        Self {
            directory,
            role: auth.role(),
        }
    }

    /// Replace the capability after an explicit re-initialisation.
    pub fn set_role(&mut self, role: SessionRole) {
        self.role = role;
    }
}

impl<D: EmployeeDirectory> EmployeeSubmission<D> {
    /// Validate and store a new record, returning it as stored.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Forbidden`] for non-admin sessions,
    /// [`SubmitError::Validation`] for incomplete drafts (both pre-network),
    /// and [`SubmitError::Remote`] when the directory call fails.
    pub async fn submit(&self, draft: &EmployeeDraft) -> Result<Employee, SubmitError> {
        if !self.role.is_admin() {
            return Err(SubmitError::Forbidden);
        }
        let payload = draft.validate()?;

        self.directory.create(&payload).await.map_err(|error| {
            warn!(%error, "employee creation failed");
            let message = error.user_message();
            SubmitError::Remote {
                message: if message.is_empty() {
                    GENERIC_WRITE_FAILURE.to_owned()
                } else {
                    message
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Pre-network refusal and message extraction coverage.

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::auth::SessionToken;
    use crate::domain::employee::UserRole;
    use crate::domain::ports::{EmployeeDirectoryError, MockEmployeeDirectory};

    fn admin_context() -> AuthContext {
        AuthContext::new(SessionToken::new("token"), SessionRole::Admin)
    }

    fn complete_draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Ann Droid".to_owned(),
            email: "ann@example.com".to_owned(),
            role: "Engineer".to_owned(),
            user_role: Some(UserRole::Employee),
            date_joined: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    fn stored(payload_name: &str) -> Employee {
        Employee {
            id: 41,
            name: payload_name.to_owned(),
            email: "ann@example.com".to_owned(),
            role: "Engineer".to_owned(),
            user_role: UserRole::Employee,
            date_joined: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    #[tokio::test]
    async fn empty_email_never_reaches_the_network() {
        let mut directory = MockEmployeeDirectory::new();
        directory.expect_create().times(0);

        let gateway = EmployeeSubmission::new(Arc::new(directory), &admin_context());
        let draft = EmployeeDraft {
            email: String::new(),
            ..complete_draft()
        };

        let error = gateway.submit(&draft).await.expect_err("incomplete draft");
        assert_eq!(
            error,
            SubmitError::Validation(DraftValidationError::MissingEmail)
        );
    }

    #[tokio::test]
    async fn non_admin_sessions_are_refused_locally() {
        let mut directory = MockEmployeeDirectory::new();
        directory.expect_create().times(0);

        let context = AuthContext::new(SessionToken::new("token"), SessionRole::Member);
        let gateway = EmployeeSubmission::new(Arc::new(directory), &context);

        let error = gateway
            .submit(&complete_draft())
            .await
            .expect_err("member sessions cannot create");
        assert_eq!(error, SubmitError::Forbidden);
    }

    #[tokio::test]
    async fn successful_submission_returns_the_stored_record() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_create()
            .times(1)
            .returning(|payload| Ok(stored(&payload.name)));

        let gateway = EmployeeSubmission::new(Arc::new(directory), &admin_context());
        let created = gateway
            .submit(&complete_draft())
            .await
            .expect("creation succeeds");
        assert_eq!(created.id, 41);
        assert_eq!(created.name, "Ann Droid");
    }

    #[tokio::test]
    async fn remote_failure_surfaces_extracted_message() {
        let mut directory = MockEmployeeDirectory::new();
        directory.expect_create().times(1).returning(|_| {
            Err(EmployeeDirectoryError::rejected(
                403,
                "Only admins can add employees",
            ))
        });

        let gateway = EmployeeSubmission::new(Arc::new(directory), &admin_context());
        let error = gateway
            .submit(&complete_draft())
            .await
            .expect_err("rejection surfaces");
        assert_eq!(
            error,
            SubmitError::Remote {
                message: "Only admins can add employees".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn blank_remote_message_falls_back_to_generic_text() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_create()
            .times(1)
            .returning(|_| Err(EmployeeDirectoryError::transport("")));

        let gateway = EmployeeSubmission::new(Arc::new(directory), &admin_context());
        let error = gateway
            .submit(&complete_draft())
            .await
            .expect_err("failure surfaces");
        assert_eq!(
            error,
            SubmitError::Remote {
                message: GENERIC_WRITE_FAILURE.to_owned()
            }
        );
    }
}
