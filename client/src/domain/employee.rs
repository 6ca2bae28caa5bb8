//! Employee record shapes and draft validation.
//!
//! Serde contract: the wire field for the privilege enum is `userrole`
//! (the server's create schema requires exactly that key; older call sites
//! that omitted it were non-conforming). Dates travel as ISO-8601 calendar
//! dates and may be absent on read.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Privilege level attached to a directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// May create records.
    #[serde(alias = "admin")]
    Admin,
    /// Read-only participant.
    #[serde(alias = "employee", alias = "user")]
    Employee,
}

impl UserRole {
    /// Canonical wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee record as held by the remote store.
///
/// The client only ever holds a read-only cached copy per fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque stable identifier owned by the store.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Free-form job role.
    pub role: String,
    /// Privilege level.
    #[serde(rename = "userrole")]
    pub user_role: UserRole,
    /// Joining date; absent for records created before the field existed.
    #[serde(default)]
    pub date_joined: Option<NaiveDate>,
}

/// Field-level failures raised before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftValidationError {
    /// The name field is empty or whitespace.
    #[error("name is required")]
    MissingName,
    /// The email field is empty or whitespace.
    #[error("email is required")]
    MissingEmail,
    /// The job role field is empty or whitespace.
    #[error("role is required")]
    MissingRole,
    /// No privilege level was selected.
    #[error("user role is required")]
    MissingUserRole,
    /// No joining date was provided.
    #[error("date joined is required")]
    MissingDateJoined,
}

/// Transient new-record form payload; discarded on success or cancel, kept
/// by the caller on remote failure so the user can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// Display name as typed.
    pub name: String,
    /// Contact email as typed.
    pub email: String,
    /// Free-form job role as typed.
    pub role: String,
    /// Selected privilege level, if any.
    pub user_role: Option<UserRole>,
    /// Selected joining date, if any.
    pub date_joined: Option<NaiveDate>,
}

impl EmployeeDraft {
    /// Check every field is present and produce the trimmed create payload.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, in form order.
    pub fn validate(&self) -> Result<NewEmployee, DraftValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftValidationError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DraftValidationError::MissingEmail);
        }
        let role = self.role.trim();
        if role.is_empty() {
            return Err(DraftValidationError::MissingRole);
        }
        let user_role = self.user_role.ok_or(DraftValidationError::MissingUserRole)?;
        let date_joined = self
            .date_joined
            .ok_or(DraftValidationError::MissingDateJoined)?;

        Ok(NewEmployee {
            name: name.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            user_role,
            date_joined,
        })
    }
}

/// Validated, trimmed create payload handed to the directory port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Free-form job role.
    pub role: String,
    /// Privilege level, serialised under the canonical `userrole` key.
    #[serde(rename = "userrole")]
    pub user_role: UserRole,
    /// Joining date.
    pub date_joined: NaiveDate,
}

#[cfg(test)]
mod tests {
    //! Draft validation and serde contract coverage.

    use rstest::rstest;

    use super::*;

    fn complete_draft() -> EmployeeDraft {
        EmployeeDraft {
            name: " Ann Droid ".to_owned(),
            email: "ann@example.com".to_owned(),
            role: "Engineer".to_owned(),
            user_role: Some(UserRole::Employee),
            date_joined: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    #[test]
    fn valid_draft_produces_trimmed_payload() {
        let payload = complete_draft().validate().expect("draft is complete");
        assert_eq!(payload.name, "Ann Droid", "surrounding whitespace trimmed");
        assert_eq!(payload.user_role, UserRole::Employee);
    }

    #[rstest]
    #[case::blank_name(
        EmployeeDraft { name: "  ".to_owned(), ..complete_draft() },
        DraftValidationError::MissingName
    )]
    #[case::blank_email(
        EmployeeDraft { email: String::new(), ..complete_draft() },
        DraftValidationError::MissingEmail
    )]
    #[case::blank_role(
        EmployeeDraft { role: String::new(), ..complete_draft() },
        DraftValidationError::MissingRole
    )]
    #[case::no_user_role(
        EmployeeDraft { user_role: None, ..complete_draft() },
        DraftValidationError::MissingUserRole
    )]
    #[case::no_date(
        EmployeeDraft { date_joined: None, ..complete_draft() },
        DraftValidationError::MissingDateJoined
    )]
    fn incomplete_drafts_name_the_missing_field(
        #[case] draft: EmployeeDraft,
        #[case] expected: DraftValidationError,
    ) {
        assert_eq!(draft.validate().expect_err("draft is incomplete"), expected);
    }

    #[test]
    fn create_payload_uses_canonical_userrole_key() {
        let payload = complete_draft().validate().expect("draft is complete");
        let body = serde_json::to_value(&payload).expect("payload serialises");
        assert_eq!(body["userrole"], "Employee");
        assert_eq!(body["date_joined"], "2024-03-01");
    }

    #[rstest]
    #[case::canonical("\"Admin\"", UserRole::Admin)]
    #[case::lowercase("\"admin\"", UserRole::Admin)]
    #[case::legacy_user("\"user\"", UserRole::Employee)]
    fn decodes_role_spellings(#[case] raw: &str, #[case] expected: UserRole) {
        let decoded: UserRole = serde_json::from_str(raw).expect("role decodes");
        assert_eq!(decoded, expected);
    }

    #[test]
    fn employee_tolerates_missing_join_date() {
        let decoded: Employee = serde_json::from_str(
            r#"{"id":7,"name":"Ann","email":"ann@example.com","role":"Engineer","userrole":"Admin"}"#,
        )
        .expect("record decodes");
        assert_eq!(decoded.date_joined, None);
    }
}
