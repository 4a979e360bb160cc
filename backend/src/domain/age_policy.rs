//! Minimum registration age policy.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::domain::Error;

/// Configured minimum age, in whole years, a user must have reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegistrationAge(u32);

impl RegistrationAge {
    /// Wrap a configured minimum age.
    pub const fn new(years: u32) -> Self {
        Self(years)
    }

    /// Minimum age in years.
    pub const fn years(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegistrationAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age in whole years on `today` for someone born on `birth_date`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use users_backend::domain::age_policy::compute_age;
///
/// let born = NaiveDate::from_ymd_opt(2000, 4, 20).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
/// assert_eq!(compute_age(born, today), 23);
/// ```
pub fn compute_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}

/// Reject birth dates that make the user younger than `minimum_age`.
pub fn enforce_minimum_age(
    birth_date: NaiveDate,
    minimum_age: RegistrationAge,
    today: NaiveDate,
) -> Result<(), Error> {
    let age = i64::from(compute_age(birth_date, today));
    if age < i64::from(minimum_age.years()) {
        return Err(Error::invalid_request(format!(
            "User must be older than {minimum_age} years old"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for age arithmetic.
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case::birthday(date(2024, 4, 20), 24)]
    #[case::day_before_birthday(date(2024, 4, 19), 23)]
    #[case::earlier_month(date(2024, 3, 1), 23)]
    #[case::later_month(date(2024, 5, 1), 24)]
    fn compute_age_counts_whole_years(#[case] today: NaiveDate, #[case] expected: i32) {
        assert_eq!(compute_age(date(2000, 4, 20), today), expected);
    }

    #[rstest]
    fn leap_day_birthdays_count_from_march() {
        let born = date(2004, 2, 29);
        assert_eq!(compute_age(born, date(2022, 2, 28)), 17);
        assert_eq!(compute_age(born, date(2022, 3, 1)), 18);
    }

    #[rstest]
    fn minimum_age_rejects_younger_users() {
        let today = date(2024, 4, 20);
        let err = enforce_minimum_age(date(2006, 4, 21), RegistrationAge::new(18), today)
            .expect_err("17 years old");
        assert_eq!(err.message(), "User must be older than 18 years old");
    }

    #[rstest]
    fn minimum_age_accepts_users_of_exact_age() {
        let today = date(2024, 4, 20);
        enforce_minimum_age(date(2006, 4, 20), RegistrationAge::new(18), today)
            .expect("18 years old");
    }

    #[rstest]
    fn default_registration_age_accepts_newborns() {
        let today = date(2024, 4, 20);
        enforce_minimum_age(date(2024, 4, 19), RegistrationAge::default(), today)
            .expect("no minimum");
    }
}
