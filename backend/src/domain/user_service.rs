//! User domain service implementing the users driving ports.
//!
//! Create and update run full validation on the incoming draft before
//! touching storage. Patch validates only the fields it applies. When an
//! incoming address differs by value from the stored one, a new address row
//! is inserted and linked; superseded rows are left in storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::age_policy::{RegistrationAge, enforce_minimum_age};
use crate::domain::ports::{
    AddressPersistenceError, AddressRepository, UserPersistenceError, UserRepository,
    UsersCommand, UsersQuery,
};
use crate::domain::validation::{
    RequiredFields, parse_date, validate_birth_date, validate_date_range, validate_email,
    validate_required,
};
use crate::domain::{AddressValue, Error, NewUser, User, UserDraft, UserId};

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<U, A> {
    users: Arc<U>,
    addresses: Arc<A>,
    clock: Arc<dyn Clock>,
    registration_age: RegistrationAge,
}

impl<U, A> UserService<U, A> {
    /// Create a new service over the given repositories.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use users_backend::domain::{RegistrationAge, UserService};
    /// # use users_backend::outbound::persistence::{
    /// #     DbPool, DieselAddressRepository, DieselUserRepository,
    /// # };
    /// # fn example(pool: DbPool) {
    /// let service = UserService::new(
    ///     Arc::new(DieselUserRepository::new(pool.clone())),
    ///     Arc::new(DieselAddressRepository::new(pool)),
    ///     Arc::new(DefaultClock),
    ///     RegistrationAge::new(18),
    /// );
    /// # let _ = service;
    /// # }
    /// ```
    pub fn new(
        users: Arc<U>,
        addresses: Arc<A>,
        clock: Arc<dyn Clock>,
        registration_age: RegistrationAge,
    ) -> Self {
        Self {
            users,
            addresses,
            clock,
            registration_age,
        }
    }
}

impl<U, A> UserService<U, A>
where
    U: UserRepository,
    A: AddressRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_address_error(error: AddressPersistenceError) -> Error {
        match error {
            AddressPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("address repository unavailable: {message}"))
            }
            AddressPersistenceError::Query { message } => {
                Error::internal(format!("address repository error: {message}"))
            }
        }
    }

    fn not_found(id: UserId) -> Error {
        Error::not_found(format!("There is no such user with id {id}"))
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Required fields, email format, birth date and registration age.
    fn validate_full(&self, draft: &UserDraft) -> Result<RequiredFields, Error> {
        let fields = validate_required(draft)?;
        validate_email(&fields.email)?;
        self.validate_new_birth_date(fields.birth_date)?;
        Ok(fields)
    }

    fn validate_new_birth_date(&self, birth_date: NaiveDate) -> Result<(), Error> {
        let today = self.today();
        validate_birth_date(birth_date, today)?;
        enforce_minimum_age(birth_date, self.registration_age, today)
    }

    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Link a freshly inserted address when `incoming` differs from the
    /// user's current one. Absent or value-equal addresses leave the link
    /// untouched.
    async fn relink_address(
        &self,
        user: &mut User,
        incoming: Option<AddressValue>,
    ) -> Result<(), Error> {
        let Some(incoming) = incoming else {
            return Ok(());
        };
        if user
            .address
            .as_ref()
            .is_some_and(|current| current.same_value_as(&incoming))
        {
            return Ok(());
        }

        let stored = self
            .addresses
            .insert(&incoming)
            .await
            .map_err(Self::map_address_error)?;
        debug!(user_id = %user.id, address_id = %stored.id, "linked new address");
        user.address = Some(stored);
        Ok(())
    }

    async fn persist(&self, user: &User) -> Result<User, Error> {
        self.users.save(user).await.map_err(Self::map_user_error)
    }
}

#[async_trait]
impl<U, A> UsersCommand for UserService<U, A>
where
    U: UserRepository,
    A: AddressRepository,
{
    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        let RequiredFields {
            email,
            first_name,
            last_name,
            birth_date,
        } = self.validate_full(&draft)?;

        let address = match draft.address {
            Some(value) => Some(
                self.addresses
                    .insert(&value)
                    .await
                    .map_err(Self::map_address_error)?,
            ),
            None => None,
        };

        let new_user = NewUser {
            email,
            first_name,
            last_name,
            birth_date,
            address,
            phone_number: draft.phone_number,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id, "created user");
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let RequiredFields {
            email,
            first_name,
            last_name,
            birth_date,
        } = self.validate_full(&draft)?;
        let mut user = self.load(id).await?;

        user.email = email;
        user.first_name = first_name;
        user.last_name = last_name;
        user.birth_date = birth_date;
        self.relink_address(&mut user, draft.address).await?;
        user.phone_number = draft.phone_number;

        let saved = self.persist(&user).await?;
        info!(user_id = %id, "updated user");
        Ok(saved)
    }

    async fn patch(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let mut user = self.load(id).await?;
        let UserDraft {
            email,
            first_name,
            last_name,
            birth_date,
            address,
            phone_number,
        } = draft;

        if let Some(email) = email {
            validate_email(&email)?;
            user.email = email;
        }
        if let Some(first_name) = first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            user.last_name = last_name;
        }
        if let Some(birth_date) = birth_date {
            self.validate_new_birth_date(birth_date)?;
            user.birth_date = birth_date;
        }
        self.relink_address(&mut user, address).await?;
        if let Some(phone_number) = phone_number {
            user.phone_number = Some(phone_number);
        }

        let saved = self.persist(&user).await?;
        info!(user_id = %id, "patched user");
        Ok(saved)
    }

    async fn delete(&self, id: UserId) -> Result<User, Error> {
        let user = self.load(id).await?;
        self.users
            .delete(id)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %id, "deleted user");
        Ok(user)
    }
}

#[async_trait]
impl<U, A> UsersQuery for UserService<U, A>
where
    U: UserRepository,
    A: AddressRepository,
{
    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.load(id).await
    }

    async fn list_by_birth_date(&self, from: &str, to: &str) -> Result<Vec<User>, Error> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        validate_date_range(from, to)?;
        let users = self
            .users
            .find_by_birth_date_range(from, to)
            .await
            .map_err(Self::map_user_error)?;
        debug!(%from, %to, count = users.len(), "listed users by birth date");
        Ok(users)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
