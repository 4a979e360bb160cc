//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Reads left-join `local_addresses` so each user comes back with its linked
//! address in a single round trip.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AddressRow, NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{local_addresses, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

type JoinedRow = (UserRow, Option<AddressRow>);

fn joined_to_user((user, address): JoinedRow) -> User {
    user.into_user(address)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<JoinedRow> = users::table
            .left_join(local_addresses::table)
            .filter(users::id.eq(id.get()))
            .select((UserRow::as_select(), Option::<AddressRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(joined_to_user))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(user.clone().into_user(UserId::new(id)))
    }

    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.find(user.id.get()))
            .set(UserChangeset::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "user {} disappeared before save",
                user.id
            )));
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JoinedRow> = users::table
            .left_join(local_addresses::table)
            .filter(users::birth_date.gt(from))
            .filter(users::birth_date.lt(to))
            .order((users::birth_date.asc(), users::id.asc()))
            .select((UserRow::as_select(), Option::<AddressRow>::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(joined_to_user).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Error translation coverage; query behaviour needs a live database.
    use super::*;
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn missing_rows_become_query_errors() {
        let error = map_diesel_error(DieselError::NotFound);
        assert_eq!(error, UserPersistenceError::query("record not found"));
    }
}
