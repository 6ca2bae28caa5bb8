//! Page-local sort over fetched employee records.
//!
//! Sorting borrows the fetched list and produces a fresh ordered copy; it
//! never reaches the network, so it orders the current page only, not the
//! whole result set.

use std::cmp::Ordering;

use chrono::NaiveDate;
use query_state::{SortDirection, SortKey, SortSelection};

use super::employee::Employee;

/// Order a page of records by the active sort selection.
///
/// Stable: records with equal keys keep their relative server order. With
/// no active key the input order is returned unchanged.
#[must_use]
pub fn sorted(records: &[Employee], selection: SortSelection) -> Vec<Employee> {
    let mut ordered = records.to_vec();
    let Some(key) = selection.key else {
        return ordered;
    };
    ordered.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match selection.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    ordered
}

fn compare(a: &Employee, b: &Employee, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => fold_case(&a.name).cmp(&fold_case(&b.name)),
        SortKey::Email => fold_case(&a.email).cmp(&fold_case(&b.email)),
        SortKey::Role => fold_case(&a.role).cmp(&fold_case(&b.role)),
        SortKey::UserRole => a.user_role.as_str().cmp(b.user_role.as_str()),
        SortKey::DateJoined => joined_or_epoch(a).cmp(&joined_or_epoch(b)),
    }
}

fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

// Absent dates fall back to the epoch so they sort first ascending and last
// descending.
fn joined_or_epoch(employee: &Employee) -> NaiveDate {
    employee.date_joined.unwrap_or_default()
}
