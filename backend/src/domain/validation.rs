//! Field-level validation rules for user records.
//!
//! Each rule returns an [`Error`] carrying the exact message clients see, so
//! callers only need `?` to propagate a failure.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{Error, UserDraft};

/// Message returned when a full record is missing one of its core fields.
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Any of email, birth date, first name or last name fields can't be empty";
/// Message returned when a birth date is today or in the future.
pub const BIRTH_DATE_MESSAGE: &str = "Birth date must be earlier than current date";
/// Message returned when a range query has its bounds out of order.
pub const DATE_RANGE_MESSAGE: &str = "From date can't be after To date";

/// Wire format accepted for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static DATE_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

// The local part excludes line terminators and the domain excludes ASCII
// whitespace only, so non-breaking spaces are allowed after the `@`.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\n\r\x{85}\x{2028}\x{2029}]+@[^ \t\n\x0B\x0C\r]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn date_shape_regex() -> &'static Regex {
    DATE_SHAPE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
            .unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

/// The four fields a full record must carry, extracted from a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    /// Contact email, not yet format-checked.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, not yet plausibility-checked.
    pub birth_date: NaiveDate,
}

/// Require email, birth date, first name and last name on a full record.
///
/// # Examples
/// ```
/// use users_backend::domain::UserDraft;
/// use users_backend::domain::validation::validate_required;
///
/// let err = validate_required(&UserDraft::default()).unwrap_err();
/// assert_eq!(
///     err.message(),
///     "Any of email, birth date, first name or last name fields can't be empty"
/// );
/// ```
pub fn validate_required(draft: &UserDraft) -> Result<RequiredFields, Error> {
    match (
        draft.email.as_ref(),
        draft.first_name.as_ref(),
        draft.last_name.as_ref(),
        draft.birth_date,
    ) {
        (Some(email), Some(first_name), Some(last_name), Some(birth_date)) => Ok(RequiredFields {
            email: email.clone(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            birth_date,
        }),
        _ => Err(Error::invalid_request(REQUIRED_FIELDS_MESSAGE)),
    }
}

/// Check that an email looks like `local@domain`.
pub fn validate_email(email: &str) -> Result<(), Error> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(Error::invalid_request(format!("Email {email} is not valid")))
    }
}

/// Check that a birth date lies strictly before `today`.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), Error> {
    if birth_date < today {
        Ok(())
    } else {
        Err(Error::invalid_request(BIRTH_DATE_MESSAGE))
    }
}

/// Check that `from` lies strictly before `to`.
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), Error> {
    if from < to {
        Ok(())
    } else {
        Err(Error::invalid_request(DATE_RANGE_MESSAGE))
    }
}

/// Parse a `YYYY-MM-DD` date supplied by a caller.
///
/// Only the zero-padded four/two/two digit form is accepted; signed years and
/// single-digit months or days are rejected before calendar checks run.
///
/// # Examples
/// ```
/// use users_backend::domain::validation::parse_date;
///
/// assert!(parse_date("2000-03-10").is_ok());
/// assert!(parse_date("2000-3-10").is_err());
/// ```
pub fn parse_date(raw: &str) -> Result<NaiveDate, Error> {
    let malformed = || Error::malformed_date(format!("Date {raw} is not a valid YYYY-MM-DD date"));
    if !date_shape_regex().is_match(raw) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| malformed())
}
