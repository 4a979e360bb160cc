//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AddressPersistenceError, AddressRepository};
use crate::domain::{Address, AddressValue};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AddressRow, NewAddressRow};
use super::pool::DbPool;
use super::schema::local_addresses;

/// Diesel-backed implementation of the [`AddressRepository`] port.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn insert(&self, address: &AddressValue) -> Result<Address, AddressPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, AddressPersistenceError::connection))?;

        let row: AddressRow = diesel::insert_into(local_addresses::table)
            .values(NewAddressRow::from(address))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                map_basic_diesel_error(
                    error,
                    AddressPersistenceError::query,
                    AddressPersistenceError::connection,
                )
            })?;

        Ok(Address::from(row))
    }
}
