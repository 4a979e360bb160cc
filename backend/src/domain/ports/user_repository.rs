//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for user records, including the address each one links to.
///
/// Reads return the linked address alongside the user. Writes persist the
/// address id currently held by the user; they never create addresses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite an existing user row with the given state.
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove a user row. Removing a missing row is not an error.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;

    /// Users born strictly between `from` and `to`, ordered by birth date.
    async fn find_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, UserPersistenceError>;
}
