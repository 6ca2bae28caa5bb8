//! Behaviour coverage for the view-state machine: intent/page interaction,
//! address-bar write-back, error transitions, and the fetch-free sort path.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use query_state::{FilterBy, Page, SortDirection, SortKey};
use rstest::rstest;

use super::*;
use crate::domain::auth::SessionToken;
use crate::domain::employee::UserRole;
use crate::domain::ports::{EmployeeDirectoryError, InMemoryAddressBar, MockEmployeeDirectory};

fn admin_context() -> AuthContext {
    AuthContext::new(SessionToken::new("token"), SessionRole::Admin)
}

fn member_context() -> AuthContext {
    AuthContext::new(SessionToken::new("token"), SessionRole::Member)
}

fn employee(id: i64, name: &str) -> Employee {
    Employee {
        id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: "Engineer".to_owned(),
        user_role: UserRole::Employee,
        date_joined: None,
    }
}

fn directory_answering_with(page: Page<Employee>) -> MockEmployeeDirectory {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_fetch_page()
        .returning(move |_| Ok(page.clone()));
    directory
}

fn controller_with(
    directory: MockEmployeeDirectory,
    address_bar: InMemoryAddressBar,
) -> DashboardController<MockEmployeeDirectory, InMemoryAddressBar> {
    DashboardController::new(Arc::new(directory), address_bar, &admin_context())
}

#[tokio::test]
async fn mount_derives_query_from_address_bar_and_fetches() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_fetch_page()
        .withf(|query| query.search == "ann" && query.filter_by == FilterBy::Name && query.page == 2)
        .times(1)
        .returning(|_| Ok(Page::new(vec![employee(1, "Ann")], 11)));

    let address_bar = InMemoryAddressBar::with_entries(BTreeMap::from([
        ("search".to_owned(), "ann".to_owned()),
        ("filter_by".to_owned(), "name".to_owned()),
        ("page".to_owned(), "2".to_owned()),
    ]));

    let mut controller = controller_with(directory, address_bar);
    controller.mount().await;

    assert_eq!(controller.phase(), &Phase::Idle);
    assert_eq!(controller.total(), 11);
    assert_eq!(controller.sorted_employees(), vec![employee(1, "Ann")]);
}

#[tokio::test]
async fn malformed_page_in_address_bar_normalizes_to_one() {
    let directory = directory_answering_with(Page::empty());
    let address_bar =
        InMemoryAddressBar::with_entries(BTreeMap::from([("page".to_owned(), "abc".to_owned())]));

    let controller = controller_with(directory, address_bar);
    assert_eq!(controller.query().page, 1);
}

#[rstest]
#[case::filter_change(true)]
#[case::search_submit(false)]
#[tokio::test]
async fn search_and_filter_intents_return_to_the_first_page(#[case] via_filter: bool) {
    let directory = directory_answering_with(Page::empty());
    let mut controller = controller_with(directory, InMemoryAddressBar::new());

    controller.set_page(3).await;
    assert_eq!(controller.query().page, 3);

    if via_filter {
        controller.set_filter_by(FilterBy::Role).await;
    } else {
        controller.submit_search().await;
    }
    assert_eq!(controller.query().page, 1, "intent must reset pagination");
}

#[tokio::test]
async fn intents_write_durable_subset_back_to_the_address_bar() {
    let directory = directory_answering_with(Page::empty());
    let mut controller = controller_with(directory, InMemoryAddressBar::new());

    controller.set_search_text("ann").await;
    controller.set_filter_by(FilterBy::Name).await;

    let entries = controller.address_bar.entries();
    assert_eq!(entries.get("search").map(String::as_str), Some("ann"));
    assert_eq!(entries.get("filter_by").map(String::as_str), Some("name"));
    assert_eq!(entries.get("page").map(String::as_str), Some("1"));
    assert!(
        !entries.contains_key("sort"),
        "sort never enters the addressable representation"
    );
}

#[tokio::test]
async fn reset_clears_search_and_filter_but_keeps_sort() {
    let directory = directory_answering_with(Page::empty());
    let mut controller = controller_with(directory, InMemoryAddressBar::new());

    controller.set_search_text("ann").await;
    controller.set_filter_by(FilterBy::Role).await;
    controller.set_sort(SortKey::Email);
    controller.reset().await;

    assert_eq!(controller.query().search, "");
    assert_eq!(controller.query().filter_by, FilterBy::All);
    assert_eq!(controller.query().page, 1);
    assert_eq!(controller.query().sort.key, Some(SortKey::Email));
}

#[tokio::test]
async fn sort_clicks_never_trigger_a_fetch() {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_fetch_page().times(0);

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    controller.set_sort(SortKey::Name);
    controller.set_sort(SortKey::Name);

    assert_eq!(controller.query().sort.key, Some(SortKey::Name));
    assert_eq!(controller.query().sort.direction, SortDirection::Desc);
}

#[tokio::test]
async fn sort_reorders_the_cached_page_without_refetching() {
    let fetched = Page::new(vec![employee(2, "Bea"), employee(1, "Ann")], 2);
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_fetch_page()
        .times(1)
        .returning(move |_| Ok(fetched.clone()));

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    controller.mount().await;

    controller.set_sort(SortKey::Name);
    let names: Vec<String> = controller
        .sorted_employees()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, ["Ann", "Bea"]);

    controller.set_sort(SortKey::Name);
    let names: Vec<String> = controller
        .sorted_employees()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, ["Bea", "Ann"], "second click flips direction");
}

#[tokio::test]
async fn fetch_failure_resets_view_and_enters_error_phase() {
    let mut directory = MockEmployeeDirectory::new();
    let mut responses = vec![
        Ok(Page::new(vec![employee(1, "Ann")], 1)),
        Err(EmployeeDirectoryError::transport("socket closed")),
        Ok(Page::new(vec![employee(1, "Ann")], 1)),
    ]
    .into_iter();
    directory
        .expect_fetch_page()
        .times(3)
        .returning(move |_| responses.next().unwrap());

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    controller.mount().await;
    assert_eq!(controller.phase(), &Phase::Idle);

    controller.set_page(2).await;
    assert_eq!(
        controller.phase(),
        &Phase::Error {
            message: "socket closed".to_owned()
        }
    );
    assert_eq!(controller.total(), 0, "failed fetch resets the view");
    assert!(controller.sorted_employees().is_empty());

    // The error phase is transient: the next intent re-enters Fetching and
    // lands back in Idle on success.
    controller.submit_search().await;
    assert_eq!(controller.phase(), &Phase::Idle);
    assert_eq!(controller.total(), 1);
}

#[tokio::test]
async fn total_pages_uses_ceiling_division() {
    let records: Vec<Employee> = (0..8).map(|n| employee(n, "Ann")).collect();
    let directory = directory_answering_with(Page::new(records, 23));

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    controller.mount().await;
    assert_eq!(controller.total_pages(), 3, "ceil(23 / 10)");
}

#[tokio::test]
async fn successful_creation_refetches_the_current_query() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_fetch_page()
        .times(2)
        .returning(|_| Ok(Page::new(vec![employee(1, "Ann")], 1)));
    directory.expect_create().times(1).returning(|payload| {
        Ok(Employee {
            id: 9,
            name: payload.name.clone(),
            email: payload.email.clone(),
            role: payload.role.clone(),
            user_role: payload.user_role,
            date_joined: Some(payload.date_joined),
        })
    });

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    controller.mount().await;

    let draft = EmployeeDraft {
        name: "Ann Droid".to_owned(),
        email: "ann@example.com".to_owned(),
        role: "Engineer".to_owned(),
        user_role: Some(UserRole::Employee),
        date_joined: NaiveDate::from_ymd_opt(2024, 3, 1),
    };
    let created = controller
        .add_employee(&draft)
        .await
        .expect("creation succeeds");
    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn failed_creation_does_not_refetch() {
    let mut directory = MockEmployeeDirectory::new();
    directory.expect_fetch_page().times(0);
    directory.expect_create().times(0);

    let mut controller = controller_with(directory, InMemoryAddressBar::new());
    let incomplete = EmployeeDraft::default();

    let error = controller
        .add_employee(&incomplete)
        .await
        .expect_err("empty draft is refused");
    assert!(matches!(error, SubmitError::Validation(_)));
}

#[tokio::test]
async fn member_sessions_cannot_open_the_add_flow() {
    let directory = directory_answering_with(Page::empty());
    let controller = DashboardController::new(
        Arc::new(directory),
        InMemoryAddressBar::new(),
        &member_context(),
    );
    assert!(!controller.can_add_employees());
}

#[tokio::test]
async fn rehydrate_replaces_capability_and_reruns_initial_fetch() {
    let mut directory = MockEmployeeDirectory::new();
    directory
        .expect_fetch_page()
        .times(1)
        .returning(|_| Ok(Page::new(vec![employee(1, "Ann")], 1)));

    let mut controller = DashboardController::new(
        Arc::new(directory),
        InMemoryAddressBar::new(),
        &member_context(),
    );
    assert!(!controller.can_add_employees());

    controller.rehydrate(&admin_context()).await;
    assert!(controller.can_add_employees());
    assert_eq!(controller.phase(), &Phase::Idle);
    assert_eq!(controller.total(), 1);
}
