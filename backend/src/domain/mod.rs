//! Domain primitives, validation rules and the user service.
//!
//! Purpose: define the user and address model, the rules a record must
//! satisfy, and the ports through which adapters reach the domain. Nothing
//! here depends on HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a client message.
//! - User, NewUser, UserDraft: stored, insertable and incoming users.
//! - Address, AddressValue: stored address and its street/house value.
//! - UserService: implementation of the users driving ports.

pub mod age_policy;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::age_policy::RegistrationAge;
pub use self::error::{Error, ErrorCode};
pub use self::user::{Address, AddressId, AddressValue, NewUser, User, UserDraft, UserId};
pub use self::user_service::UserService;
