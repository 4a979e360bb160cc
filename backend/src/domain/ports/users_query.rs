//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a single user.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Users born strictly between two `YYYY-MM-DD` dates.
    ///
    /// The raw strings are parsed by the implementation so malformed dates
    /// surface as domain errors.
    async fn list_by_birth_date(&self, from: &str, to: &str) -> Result<Vec<User>, Error>;
}
