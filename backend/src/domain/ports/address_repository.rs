//! Port abstraction for address persistence adapters.
//!
//! Addresses are append-only from the domain's point of view: a changed
//! address is stored as a new row and the old row is left in place.

use async_trait::async_trait;

use crate::domain::{Address, AddressValue};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by address repository adapters.
    pub enum AddressPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "address repository query failed: {message}",
    }
}

/// Storage for address rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert a new address row and return it with its assigned identifier.
    async fn insert(&self, address: &AddressValue) -> Result<Address, AddressPersistenceError>;
}
