//! User directory domain service.
//!
//! Orchestrates the record store and the pagination engine for the lookup,
//! registration, and listing operations. Rendering stays in the HTTP adapter.

use std::sync::Arc;

use pagination::{Page, PageNumber, PageSize, paginate};
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Error, NewUser, User};

/// Message shown when a username lookup finds no live record.
pub const USER_NOT_FOUND: &str = "User not found";

/// Message answered while the record store is unreachable.
pub const STORE_UNAVAILABLE: &str = "user repository unavailable";

/// View payload for a single-user lookup.
///
/// Absence is reported as data: `user` is `None` and `error` carries
/// [`USER_NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLookup {
    pub user: Option<User>,
    pub error: Option<&'static str>,
}

impl UserLookup {
    fn from_match(user: Option<User>) -> Self {
        let error = user.is_none().then_some(USER_NOT_FOUND);
        Self { user, error }
    }
}

/// View payload for one page of the listing.
///
/// The page metadata is flattened alongside `users`, giving the template
/// `users`, `page`, `totalPages`, `hasPrev`, `prevPage`, `hasNext`, and
/// `nextPage` at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    #[serde(flatten)]
    pub page: Page,
}

/// Domain service backing the user directory endpoints.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
    page_size: PageSize,
}

impl UserDirectory {
    /// Create a directory over `users`, listing `page_size` rows per page.
    pub fn new(users: Arc<dyn UserRepository>, page_size: PageSize) -> Self {
        Self { users, page_size }
    }

    /// Adapter text stays in the logs; clients only see the category.
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match &error {
            UserPersistenceError::Connection { .. } => {
                warn!(message = error.message(), "user repository unavailable");
                Error::service_unavailable(STORE_UNAVAILABLE)
            }
            UserPersistenceError::Query { .. } => {
                error!(message = error.message(), "user repository query failed");
                Error::internal(format!("user repository error: {}", error.message()))
            }
        }
    }

    /// Find the live user called `username`.
    ///
    /// A miss is not an error; repeated lookups of an unknown name keep
    /// returning the not-found payload.
    pub async fn lookup(&self, username: &str) -> Result<UserLookup, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(UserLookup::from_match(user))
    }

    /// Store a new user exactly as supplied.
    pub async fn register(&self, user: NewUser) -> Result<User, Error> {
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Count, paginate, then scan the requested page.
    pub async fn list_page(&self, requested: PageNumber) -> Result<UserPage, Error> {
        let total = self
            .users
            .count_all()
            .await
            .map_err(Self::map_persistence_error)?;
        let page = paginate(total, requested, self.page_size);
        let users = self
            .users
            .scan_page(page.limit(), page.offset())
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(UserPage { users, page })
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
