//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the users driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Create, update, patch and delete.
    pub users_command: Arc<dyn UsersCommand>,
    /// Single and range reads.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }

    /// Construct state from one value implementing both ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use users_backend::domain::{RegistrationAge, UserService};
    /// use users_backend::inbound::http::state::HttpState;
    /// use users_backend::outbound::persistence::{
    ///     DbPool, DieselAddressRepository, DieselUserRepository,
    /// };
    ///
    /// fn build(pool: DbPool) -> HttpState {
    ///     HttpState::from_service(Arc::new(UserService::new(
    ///         Arc::new(DieselUserRepository::new(pool.clone())),
    ///         Arc::new(DieselAddressRepository::new(pool)),
    ///         Arc::new(DefaultClock),
    ///         RegistrationAge::default(),
    ///     )))
    /// }
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersCommand + UsersQuery + 'static,
    {
        Self {
            users_command: service.clone(),
            users_query: service,
        }
    }
}
