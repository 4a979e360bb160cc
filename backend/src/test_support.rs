//! Test utilities for the backend crate.
//!
//! In-memory repository doubles and a fixed clock shared by unit tests (in
//! `src/`) and integration tests (in `tests/`). Compiled for tests and when
//! the `test-support` feature is enabled.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AddressPersistenceError, AddressRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Address, AddressId, AddressValue, NewUser, RegistrationAge, User, UserId, UserService,
};

/// Clock pinned to noon UTC on a given date.
///
/// Noon keeps the local calendar date equal to the UTC one for every
/// common timezone offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    utc_now: DateTime<Utc>,
}

impl FixedClock {
    /// Pin the clock to noon UTC on `today`.
    pub fn on(today: NaiveDate) -> Self {
        let noon = today.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self {
            utc_now: Utc.from_utc_datetime(&noon),
        }
    }

    /// Calendar date the service will treat as today.
    pub fn today(&self) -> NaiveDate {
        self.local().date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[derive(Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

/// In-memory [`UserRepository`] assigning sequential identifiers from 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
    unavailable: Mutex<bool>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        *lock(&self.unavailable) = unavailable;
    }

    /// Snapshot of every stored user ordered by id.
    pub fn stored(&self) -> Vec<User> {
        lock(&self.table).rows.values().cloned().collect()
    }

    fn check_available(&self) -> Result<(), UserPersistenceError> {
        if *lock(&self.unavailable) {
            Err(UserPersistenceError::connection("in-memory store offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.table).rows.get(&id.get()).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.check_available()?;
        let mut table = lock(&self.table);
        table.last_id += 1;
        let id = table.last_id;
        let stored = user.clone().into_user(UserId::new(id));
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        self.check_available()?;
        let mut table = lock(&self.table);
        match table.rows.get_mut(&user.id.get()) {
            Some(row) => {
                *row = user.clone();
                Ok(user.clone())
            }
            None => Err(UserPersistenceError::query(format!(
                "user {} disappeared before save",
                user.id
            ))),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.check_available()?;
        lock(&self.table).rows.remove(&id.get());
        Ok(())
    }

    async fn find_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, UserPersistenceError> {
        self.check_available()?;
        let mut users: Vec<User> = lock(&self.table)
            .rows
            .values()
            .filter(|user| user.birth_date > from && user.birth_date < to)
            .cloned()
            .collect();
        users.sort_by_key(|user| (user.birth_date, user.id));
        Ok(users)
    }
}

/// In-memory [`AddressRepository`] that keeps every inserted row.
#[derive(Default)]
pub struct InMemoryAddressRepository {
    rows: Mutex<Vec<Address>>,
}

impl InMemoryAddressRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every address row inserted so far, in insertion order.
    pub fn stored(&self) -> Vec<Address> {
        lock(&self.rows).clone()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn insert(&self, address: &AddressValue) -> Result<Address, AddressPersistenceError> {
        let mut rows = lock(&self.rows);
        let next_id = i64::try_from(rows.len())
            .map_err(|err| AddressPersistenceError::query(err.to_string()))?
            + 1;
        let stored = Address::new(AddressId::new(next_id), address.clone());
        rows.push(stored.clone());
        Ok(stored)
    }
}

/// Service wired to in-memory repositories, with handles to inspect them.
pub struct InMemoryUsers {
    /// User rows.
    pub users: Arc<InMemoryUserRepository>,
    /// Address rows.
    pub addresses: Arc<InMemoryAddressRepository>,
    /// Service under test.
    pub service: Arc<UserService<InMemoryUserRepository, InMemoryAddressRepository>>,
}

impl InMemoryUsers {
    /// Build a service that treats `today` as the current date.
    pub fn new(today: NaiveDate, registration_age: RegistrationAge) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let addresses = Arc::new(InMemoryAddressRepository::new());
        let service = Arc::new(UserService::new(
            users.clone(),
            addresses.clone(),
            Arc::new(FixedClock::on(today)),
            registration_age,
        ));
        Self {
            users,
            addresses,
            service,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour checks for the doubles themselves.
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn new_user(birth_date: NaiveDate) -> NewUser {
        NewUser {
            email: "a@b".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            birth_date,
            address: None,
            phone_number: None,
        }
    }

    #[rstest]
    fn fixed_clock_reports_its_date() {
        assert_eq!(FixedClock::on(date(2024, 6, 15)).today(), date(2024, 6, 15));
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_assign_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.insert(&new_user(date(1990, 1, 1))).await.expect("insert");
        let second = repo.insert(&new_user(date(1991, 1, 1))).await.expect("insert");

        assert_eq!((first.id, second.id), (UserId::new(1), UserId::new(2)));
        assert_eq!(repo.stored(), vec![first, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn range_excludes_bounds_and_orders_by_birth_date() {
        let repo = InMemoryUserRepository::new();
        for birth_date in [date(1995, 1, 1), date(1990, 1, 1), date(2000, 1, 1)] {
            repo.insert(&new_user(birth_date)).await.expect("insert");
        }

        let found = repo
            .find_by_birth_date_range(date(1990, 1, 1), date(2000, 1, 2))
            .await
            .expect("range");

        let dates: Vec<_> = found.iter().map(|user| user.birth_date).collect();
        assert_eq!(dates, vec![date(1995, 1, 1), date(2000, 1, 1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_reports_connection_errors() {
        let repo = InMemoryUserRepository::new();
        repo.set_unavailable(true);

        let error = repo.find_by_id(UserId::new(1)).await.expect_err("offline");

        assert!(matches!(error, UserPersistenceError::Connection { .. }));
    }
}
