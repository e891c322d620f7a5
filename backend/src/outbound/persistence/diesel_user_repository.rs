//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every read filters out soft-deleted rows. Listings are ordered by `id`
//! ascending, and username lookups take the lowest matching `id`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row)
        .map_err(|err| UserPersistenceError::query(format!("invalid user row {id}: {err}")))
}

/// Clamp a `u64` window bound into Postgres' signed `BIGINT` range.
fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn count_all(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = users::table
            .filter(users::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(count)
            .map_err(|_| UserPersistenceError::query(format!("negative user count {count}")))
    }

    async fn scan_page(&self, limit: u64, offset: u64) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .limit(to_sql_bound(limit))
            .offset(to_sql_bound(offset))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: &user.username,
            email: &user.email,
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(20, 20)]
    #[case(u64::MAX, i64::MAX)]
    fn window_bounds_clamp_to_bigint(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_sql_bound(value), expected);
    }

    #[test]
    fn rows_with_invalid_ids_are_query_errors() {
        let now = Utc::now();
        let row = UserRow {
            id: 0,
            username: "ghost".to_owned(),
            email: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }

    #[test]
    fn rows_keep_store_timestamps() {
        let created = Utc::now();
        let updated = created + chrono::TimeDelta::seconds(5);
        let row = UserRow {
            id: 4,
            username: "ada".to_owned(),
            email: "ada@x.com".to_owned(),
            created_at: created,
            updated_at: updated,
            deleted_at: None,
        };
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id().get(), 4);
        assert_eq!(user.updated_at(), updated);
    }
}
