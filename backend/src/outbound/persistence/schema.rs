//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Address rows. Rows are only ever inserted; superseded addresses stay.
    local_addresses (id) {
        /// Primary key.
        id -> Int8,
        /// Street name.
        street -> Varchar,
        /// House number on the street.
        house_number -> Int8,
    }
}

diesel::table! {
    /// User records. `birth_date` is indexed for range queries.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Contact email.
        email -> Varchar,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Date of birth.
        birth_date -> Date,
        /// Optional link to `local_addresses.id`.
        address_id -> Nullable<Int8>,
        /// Optional contact phone number.
        phone_number -> Nullable<Varchar>,
    }
}

diesel::joinable!(users -> local_addresses (address_id));
diesel::allow_tables_to_appear_in_same_query!(local_addresses, users);
