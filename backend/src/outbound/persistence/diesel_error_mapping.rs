//! Translation of pool and Diesel failures into `UserPersistenceError`.
//!
//! Database details are logged at `debug` and replaced with generic text so
//! they never reach HTTP responses.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(error = %error, "user repository pool failure");
    UserPersistenceError::connection("database connection unavailable")
}

/// Closed connections map to connection errors; everything else is a query
/// error.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}
