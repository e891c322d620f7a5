//! Tests for the user directory service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use pagination::{DEFAULT_PAGE_SIZE, PageNumber};
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, UserId};

fn make_directory(repo: MockUserRepository) -> UserDirectory {
    UserDirectory::new(Arc::new(repo), DEFAULT_PAGE_SIZE)
}

fn user(id: i64, username: &str) -> User {
    User::new(
        UserId::new(id).expect("positive id"),
        username,
        format!("{username}@example.com"),
        Utc::now(),
    )
}

#[tokio::test]
async fn lookup_returns_matching_user() {
    let mut repo = MockUserRepository::new();
    let alice = user(1, "alice");
    let expected = alice.clone();
    repo.expect_find_by_username()
        .withf(|username: &str| username == "alice")
        .times(1)
        .return_once(move |_| Ok(Some(alice)));

    let lookup = make_directory(repo).lookup("alice").await.expect("lookup");
    assert_eq!(lookup.user, Some(expected));
    assert!(lookup.error.is_none());
}

#[tokio::test]
async fn repeated_lookups_of_unknown_user_report_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(2)
        .returning(|_| Ok(None));
    let directory = make_directory(repo);

    for _ in 0..2 {
        let lookup = directory.lookup("ghost").await.expect("lookup");
        assert!(lookup.user.is_none());
        assert_eq!(lookup.error, Some(USER_NOT_FOUND));
    }
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn lookup_maps_persistence_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Err(failure));

    let error = make_directory(repo)
        .lookup("alice")
        .await
        .expect_err("failure propagates");
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn connection_failures_hide_adapter_text() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert().return_once(|_| {
        Err(UserPersistenceError::connection(
            "error connecting to server: db.internal:5432 password authentication failed",
        ))
    });

    let error = make_directory(repo)
        .register(NewUser::default())
        .await
        .expect_err("connection failure propagates");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.message(), STORE_UNAVAILABLE);
}

#[tokio::test]
async fn register_passes_fields_through_unvalidated() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .withf(|new_user: &NewUser| new_user.username.is_empty() && new_user.email.is_empty())
        .times(1)
        .return_once(|_| Ok(user(9, "")));

    let stored = make_directory(repo)
        .register(NewUser::default())
        .await
        .expect("register");
    assert_eq!(stored.id().get(), 9);
}

#[tokio::test]
async fn list_page_scans_the_window_for_the_requested_page() {
    let mut repo = MockUserRepository::new();
    repo.expect_count_all().times(1).return_once(|| Ok(25));
    repo.expect_scan_page()
        .with(eq(10_u64), eq(20_u64))
        .times(1)
        .return_once(|_, _| Ok((21..=25).map(|id| user(id, &format!("user{id}"))).collect()));

    let listing = make_directory(repo)
        .list_page(PageNumber::new(3))
        .await
        .expect("list");

    assert_eq!(listing.users.len(), 5);
    assert_eq!(listing.page.total_pages(), 3);
    assert!(listing.page.has_prev());
    assert!(!listing.page.has_next());
}

#[tokio::test]
async fn list_page_payload_flattens_page_metadata() {
    let mut repo = MockUserRepository::new();
    repo.expect_count_all().return_once(|| Ok(0));
    repo.expect_scan_page().return_once(|_, _| Ok(Vec::new()));

    let listing = make_directory(repo)
        .list_page(PageNumber::FIRST)
        .await
        .expect("list");
    let value = serde_json::to_value(&listing).expect("serialise page");

    assert_eq!(
        value,
        json!({
            "users": [],
            "page": 1,
            "totalPages": 0,
            "hasPrev": false,
            "prevPage": 0,
            "hasNext": false,
            "nextPage": 2,
        })
    );
}

#[tokio::test]
async fn list_page_does_not_scan_when_count_fails() {
    let mut repo = MockUserRepository::new();
    repo.expect_count_all()
        .return_once(|| Err(UserPersistenceError::connection("pool exhausted")));
    repo.expect_scan_page().never();

    let error = make_directory(repo)
        .list_page(PageNumber::FIRST)
        .await
        .expect_err("count failure propagates");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
