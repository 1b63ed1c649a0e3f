//! Field-level checks applied by the clients before a request reaches a store.
//!
//! Every check for a request runs before anything is sent, so a rejected
//! create or update never touches stored state. On updates only the supplied
//! fields are checked.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use thiserror::Error;

use crate::domain::{FilmCreate, FilmPatch, UserCreate, UserPatch};

/// Longest accepted film description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Earliest accepted release date: the first public film screening.
pub static EARLIEST_RELEASE_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid calendar date"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Film name must not be blank")]
    BlankName,
    #[error("Description is {length} characters long, at most {max} allowed", max = MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong { length: usize },
    #[error("Release date {0} is before {earliest}", earliest = *EARLIEST_RELEASE_DATE)]
    ReleaseDateTooEarly(NaiveDate),
    #[error("Duration must be a positive number of minutes")]
    NonPositiveDuration,
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("Login must not be blank")]
    BlankLogin,
    #[error("Login must not contain whitespace: {0:?}")]
    LoginContainsWhitespace(String),
    #[error("Birthday {0} is in the future")]
    BirthdayInFuture(NaiveDate),
}

// =============================================================================
// Films
// =============================================================================

pub fn validate_new_film(params: &FilmCreate) -> Result<(), ValidationError> {
    check_name(&params.name)?;
    if let Some(description) = &params.description {
        check_description(description)?;
    }
    check_release_date(params.release_date)?;
    check_duration(params.duration)
}

pub fn validate_film_patch(patch: &FilmPatch) -> Result<(), ValidationError> {
    if let Some(name) = &patch.name {
        check_name(name)?;
    }
    if let Some(description) = &patch.description {
        check_description(description)?;
    }
    if let Some(release_date) = patch.release_date {
        check_release_date(release_date)?;
    }
    if let Some(duration) = patch.duration {
        check_duration(duration)?;
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong { length });
    }
    Ok(())
}

fn check_release_date(release_date: NaiveDate) -> Result<(), ValidationError> {
    if release_date < *EARLIEST_RELEASE_DATE {
        return Err(ValidationError::ReleaseDateTooEarly(release_date));
    }
    Ok(())
}

fn check_duration(duration: u32) -> Result<(), ValidationError> {
    if duration == 0 {
        return Err(ValidationError::NonPositiveDuration);
    }
    Ok(())
}

// =============================================================================
// Users
// =============================================================================

pub fn validate_new_user(params: &UserCreate) -> Result<(), ValidationError> {
    check_email(&params.email)?;
    check_login(&params.login)?;
    check_birthday(params.birthday, today())
}

pub fn validate_user_patch(patch: &UserPatch) -> Result<(), ValidationError> {
    if let Some(email) = &patch.email {
        check_email(email)?;
    }
    if let Some(login) = &patch.login {
        check_login(login)?;
    }
    if let Some(birthday) = patch.birthday {
        check_birthday(birthday, today())?;
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

fn check_login(login: &str) -> Result<(), ValidationError> {
    if login.trim().is_empty() {
        return Err(ValidationError::BlankLogin);
    }
    if login.chars().any(char::is_whitespace) {
        return Err(ValidationError::LoginContainsWhitespace(login.to_string()));
    }
    Ok(())
}

fn check_birthday(birthday: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if birthday > today {
        return Err(ValidationError::BirthdayInFuture(birthday));
    }
    Ok(())
}
