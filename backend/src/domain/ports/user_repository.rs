//! Port abstraction for the record store backing the user directory.
use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
    shared { message: str }
}

/// Record store operations used by the directory.
///
/// Implementations must hide soft-deleted rows from every read and must
/// return [`UserRepository::scan_page`] rows in ascending id order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// First live user whose username matches exactly, lowest id first.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Number of live users.
    async fn count_all(&self) -> Result<u64, UserPersistenceError>;

    /// At most `limit` live users after skipping `offset`.
    async fn scan_page(&self, limit: u64, offset: u64) -> Result<Vec<User>, UserPersistenceError>;

    /// Persist a new user and return the stored record.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
