//! Domain types and services for the directory browser.
//!
//! Purpose: own the authoritative query state, the fetched page, and the
//! rules connecting them. Keep types immutable where possible and document
//! invariants and serde contracts in each type's Rustdoc.
//!
//! Public surface:
//! - [`DashboardController`] — the view-state machine receiving user intents.
//! - [`PageLoader`] — fetch orchestration with stale-response suppression.
//! - [`EmployeeSubmission`] — validated record creation.
//! - [`Employee`], [`EmployeeDraft`], [`NewEmployee`] — record shapes.
//! - [`AuthContext`] — explicit session capability passed at construction.

pub mod auth;
pub mod controller;
pub mod employee;
pub mod loader;
pub mod ports;
pub mod sort;
pub mod submission;

pub use self::auth::{AuthContext, SessionRole, SessionToken};
pub use self::controller::{DashboardController, Phase};
pub use self::employee::{DraftValidationError, Employee, EmployeeDraft, NewEmployee, UserRole};
pub use self::loader::{LoadOutcome, PageLoader};
pub use self::submission::{EmployeeSubmission, SubmitError};
