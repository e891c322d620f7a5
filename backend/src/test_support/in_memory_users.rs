//! In-memory record store used by handler and integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::FixedClock;

#[derive(Default)]
struct State {
    users: Vec<User>,
    last_id: i64,
    failure: Option<UserPersistenceError>,
}

/// [`UserRepository`] backed by a vector in id order.
///
/// Identifiers are assigned sequentially from 1 and timestamps come from the
/// injected clock. Soft-deleted rows stay in storage but are hidden from
/// every port operation.
pub struct InMemoryUserRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(FixedClock::default()))
    }
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    /// Make every subsequent port call fail with `failure`; `None` restores
    /// normal behaviour.
    pub fn fail_with(&self, failure: Option<UserPersistenceError>) {
        self.lock_state().failure = failure;
    }

    /// Soft-delete every live user called `username`, returning how many
    /// rows were marked.
    pub fn soft_delete(&self, username: &str) -> usize {
        let now = self.clock.utc();
        let mut state = self.lock_state();
        let mut marked = 0;
        for user in state.users.iter_mut() {
            if user.username() == username && !user.is_deleted() {
                *user = user.clone().with_deleted_at(Some(now));
                marked += 1;
            }
        }
        marked
    }

    /// Every stored row, including soft-deleted ones.
    pub fn stored(&self) -> Vec<User> {
        self.lock_state().users.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory user repository mutex"),
        }
    }

    fn live_state(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        let state = self.lock_state();
        match &state.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.live_state()?;
        Ok(state
            .users
            .iter()
            .find(|user| !user.is_deleted() && user.username() == username)
            .cloned())
    }

    async fn count_all(&self) -> Result<u64, UserPersistenceError> {
        let state = self.live_state()?;
        let live = state.users.iter().filter(|user| !user.is_deleted()).count();
        Ok(u64::try_from(live).unwrap_or(u64::MAX))
    }

    async fn scan_page(&self, limit: u64, offset: u64) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.live_state()?;
        Ok(state
            .users
            .iter()
            .filter(|user| !user.is_deleted())
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let now = self.clock.utc();
        let mut state = self.live_state()?;
        let id = UserId::new(state.last_id + 1)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        state.last_id = id.get();
        let stored = User::new(id, user.username.clone(), user.email.clone(), now);
        state.users.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn assigns_sequential_ids_from_one() {
        let repo = InMemoryUserRepository::default();
        let first = repo.insert(&NewUser::new("alice", "a@x.com")).await.expect("insert");
        let second = repo.insert(&NewUser::new("bob", "b@x.com")).await.expect("insert");
        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[tokio::test]
    async fn timestamps_come_from_the_injected_clock() {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 30, 12, 0, 0)
            .single()
            .expect("valid instant");
        let repo = InMemoryUserRepository::new(Arc::new(FixedClock::new(now)));

        let stored = repo.insert(&NewUser::new("alice", "a@x.com")).await.expect("insert");

        assert_eq!(stored.created_at(), now);
        assert_eq!(stored.updated_at(), now);
        assert!(!stored.is_deleted());
    }

    #[tokio::test]
    async fn duplicate_usernames_resolve_to_lowest_id() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&NewUser::new("alice", "first@x.com")).await.expect("insert");
        repo.insert(&NewUser::new("alice", "second@x.com")).await.expect("insert");

        let found = repo.find_by_username("alice").await.expect("find").expect("match");
        assert_eq!(found.email(), "first@x.com");
    }

    #[tokio::test]
    async fn soft_deleted_rows_are_hidden() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&NewUser::new("alice", "a@x.com")).await.expect("insert");
        repo.insert(&NewUser::new("bob", "b@x.com")).await.expect("insert");
        assert_eq!(repo.soft_delete("alice"), 1);

        assert!(repo.find_by_username("alice").await.expect("find").is_none());
        assert_eq!(repo.count_all().await.expect("count"), 1);
        let page = repo.scan_page(10, 0).await.expect("scan");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].username(), "bob");
        assert_eq!(repo.stored().len(), 2);
    }

    #[tokio::test]
    async fn scan_past_the_end_is_empty() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&NewUser::new("alice", "a@x.com")).await.expect("insert");
        assert!(repo.scan_page(10, u64::MAX).await.expect("scan").is_empty());
    }

    #[tokio::test]
    async fn injected_failures_surface_until_cleared() {
        let repo = InMemoryUserRepository::default();
        repo.fail_with(Some(UserPersistenceError::connection("refused")));
        assert!(matches!(
            repo.count_all().await,
            Err(UserPersistenceError::Connection { .. })
        ));
        repo.fail_with(None);
        assert_eq!(repo.count_all().await.expect("count"), 0);
    }
}
