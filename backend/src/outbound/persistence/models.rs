//! Internal Diesel row structs.
//!
//! These types stay inside the persistence layer; repositories convert them
//! to domain values before returning.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{Address, AddressId, AddressValue, NewUser, User, UserId};

use super::schema::{local_addresses, users};

/// Row struct for reading from the local_addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = local_addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i64,
    pub street: String,
    pub house_number: i64,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address::new(
            AddressId::new(row.id),
            AddressValue::new(row.street, row.house_number),
        )
    }
}

/// Insertable struct for new address rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = local_addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub street: &'a str,
    pub house_number: i64,
}

impl<'a> From<&'a AddressValue> for NewAddressRow<'a> {
    fn from(value: &'a AddressValue) -> Self {
        Self {
            street: value.street.as_str(),
            house_number: value.house_number,
        }
    }
}

/// Row struct for reading from the users table.
///
/// The address link is read through the join rather than as a column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub phone_number: Option<String>,
}

impl UserRow {
    /// Combine a user row with its left-joined address row.
    pub(crate) fn into_user(self, address: Option<AddressRow>) -> User {
        User {
            id: UserId::new(self.id),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            address: address.map(Address::from),
            phone_number: self.phone_number,
        }
    }
}

/// Insertable struct for new user rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: NaiveDate,
    pub address_id: Option<i64>,
    pub phone_number: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            birth_date: user.birth_date,
            address_id: user.address.as_ref().map(|address| address.id.get()),
            phone_number: user.phone_number.as_deref(),
        }
    }
}

/// Changeset overwriting every mutable column of a user row.
///
/// `treat_none_as_null` makes a cleared phone number or address reach the
/// database instead of being skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: NaiveDate,
    pub address_id: Option<i64>,
    pub phone_number: Option<&'a str>,
}

impl<'a> From<&'a User> for UserChangeset<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: user.email.as_str(),
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            birth_date: user.birth_date,
            address_id: user.address.as_ref().map(|address| address.id.get()),
            phone_number: user.phone_number.as_deref(),
        }
    }
}
