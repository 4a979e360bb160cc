//! User and address data model.
//!
//! Identifiers are assigned by storage, so the domain only ever sees them on
//! records that have already been persisted. Incoming payloads are modelled
//! separately by [`UserDraft`], where every field is optional and the
//! service decides which ones are mandatory for the operation at hand.

use std::fmt;

use chrono::NaiveDate;

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage-assigned address identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressId(i64);

impl AddressId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Street and house number of an address, without identity.
///
/// Equality is value equality: two addresses with the same street and house
/// number are the same address even when stored under different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressValue {
    /// Street name.
    pub street: String,
    /// House number on the street.
    pub house_number: i64,
}

impl AddressValue {
    /// Build an address value.
    pub fn new(street: impl Into<String>, house_number: i64) -> Self {
        Self {
            street: street.into(),
            house_number,
        }
    }
}

/// Persisted address linked from a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Storage identifier.
    pub id: AddressId,
    /// Street and house number.
    pub value: AddressValue,
}

impl Address {
    /// Build a persisted address from its parts.
    pub fn new(id: AddressId, value: AddressValue) -> Self {
        Self { id, value }
    }

    /// Whether this address holds the same street and house number as `other`.
    pub fn same_value_as(&self, other: &AddressValue) -> bool {
        &self.value == other
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `email` matches `^.+@\S+$`.
/// - `birth_date` was strictly before the current date when last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage identifier.
    pub id: UserId,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Linked address, if any.
    pub address: Option<Address>,
    /// Contact phone number, if any.
    pub phone_number: Option<String>,
}

/// Validated user ready to be inserted; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Address persisted ahead of the user, if one was supplied.
    pub address: Option<Address>,
    /// Contact phone number, if any.
    pub phone_number: Option<String>,
}

impl NewUser {
    /// Attach the storage identifier once the row has been inserted.
    pub fn into_user(self, id: UserId) -> User {
        let Self {
            email,
            first_name,
            last_name,
            birth_date,
            address,
            phone_number,
        } = self;
        User {
            id,
            email,
            first_name,
            last_name,
            birth_date,
            address,
            phone_number,
        }
    }
}

/// Incoming user payload for create, update and patch.
///
/// Every field is optional here: create and update require the four core
/// fields, while patch only touches the fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Contact email.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Address to link.
    pub address: Option<AddressValue>,
    /// Contact phone number.
    pub phone_number: Option<String>,
}
