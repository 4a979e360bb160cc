//! HTTP server configuration object.

use std::net::SocketAddr;

use users_backend::domain::RegistrationAge;
use users_backend::outbound::persistence::DbPool;

/// Everything the server needs once settings are resolved and the pool is up.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) registration_age: RegistrationAge,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            registration_age: RegistrationAge::default(),
        }
    }

    /// Set the minimum age enforced on create, update and patch.
    #[must_use]
    pub fn with_registration_age(mut self, registration_age: RegistrationAge) -> Self {
        self.registration_age = registration_age;
        self
    }
}
