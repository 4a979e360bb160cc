//! Driving port for user mutations.
//!
//! Inbound adapters call this port with already-deserialised drafts; the
//! implementation owns validation, reconciliation and persistence.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, replacing, patching and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from a complete draft.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace every field of an existing user with a complete draft.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Apply only the fields present in the draft to an existing user.
    async fn patch(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Remove a user and return its last stored state.
    async fn delete(&self, id: UserId) -> Result<User, Error>;
}
