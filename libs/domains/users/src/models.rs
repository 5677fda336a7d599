use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidateArgs, ValidateLength, ValidationError, ValidationErrors};

pub const PHONE_NUMBER_LENGTH: u64 = 10;
pub const MINIMUM_AGE: i32 = 18;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
}

impl User {
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }

    /// `(XXX) XXX-XXXX`; numbers that are not 10 ASCII digits are returned as stored.
    pub fn formatted_phone_number(&self) -> String {
        let digits = &self.phone_number;
        if is_phone_number(digits) {
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
        } else {
            digits.clone()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id: {}", self.id)?;
        writeln!(
            f,
            "Name: {} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default()
        )?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Date of Birth: {}", self.date_of_birth.format("%m/%d/%Y"))?;
        writeln!(f, "Age: {}", self.age_on(today()))?;
        write!(f, "Phone Number: {}", self.formatted_phone_number())
    }
}

/// Current date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole years between `date_of_birth` and `today`.
///
/// A 29 February birthday falls on 28 February in non-leap years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if today < birthday_in(date_of_birth, today.year()) {
        age -= 1;
    }
    age
}

fn birthday_in(date_of_birth: NaiveDate, year: i32) -> NaiveDate {
    date_of_birth
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date_of_birth)
}

/// User as returned by the API, with the derived age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub age: i32,
}

impl UserResponse {
    pub fn from_user(user: User, today: NaiveDate) -> Self {
        Self {
            age: user.age_on(today),
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            date_of_birth: user.date_of_birth,
            phone_number: user.phone_number,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from_user(user, today())
    }
}

/// Request body for create and update.
///
/// Every field is optional here so that missing values surface as field
/// errors from [`UserPayload::validate`] rather than as a body rejection.
/// The minimum-age rule needs the evaluation date, passed as the context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(context = NaiveDate)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(
        required(message = "The first_name field is required."),
        length(
            max = 128,
            message = "The field first_name must be a string with a maximum length of '128'."
        ),
        custom(function = "not_blank", message = "The first_name field is required.")
    )]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(
        max = 128,
        message = "The field last_name must be a string with a maximum length of '128'."
    ))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field is not a valid e-mail address."),
        custom(function = "not_blank", message = "The email field is required.")
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    #[validate(
        required(message = "The date_of_birth field is required."),
        custom(
            function = "minimum_age",
            use_context,
            message = "User must be at least 18 years old."
        )
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    #[validate(
        required(message = "The phone_number field is required."),
        custom(function = "not_blank", message = "The phone_number field is required."),
        custom(function = "ten_digits", message = "Phone number must be 10 digits long.")
    )]
    pub phone_number: Option<String>,
}

impl UserPayload {
    /// Check every field against `today` and build a [`User`].
    ///
    /// All failures are collected. The returned user carries the client id,
    /// or nil when absent; the service decides the final id.
    pub fn validate(self, today: NaiveDate) -> Result<User, ValidationErrors> {
        self.validate_with_args(&today)?;

        let (Some(first_name), Some(email), Some(date_of_birth), Some(phone_number)) = (
            self.first_name,
            self.email,
            self.date_of_birth,
            self.phone_number,
        ) else {
            // `required` already rejected every None above
            let mut errors = ValidationErrors::new();
            errors.add("user", ValidationError::new("required"));
            return Err(errors);
        };

        Ok(User {
            id: self.id.unwrap_or_else(Uuid::nil),
            first_name,
            last_name: self.last_name,
            email,
            date_of_birth,
            phone_number,
        })
    }
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            first_name: Some(user.first_name),
            last_name: user.last_name,
            email: Some(user.email),
            date_of_birth: Some(user.date_of_birth),
            phone_number: Some(user.phone_number),
        }
    }
}

// Blank strings count as missing
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn minimum_age(date_of_birth: &NaiveDate, today: &NaiveDate) -> Result<(), ValidationError> {
    if age_on(*date_of_birth, *today) < MINIMUM_AGE {
        let mut error = ValidationError::new("minimum_age");
        error.add_param(Cow::from("min"), &MINIMUM_AGE);
        return Err(error);
    }
    Ok(())
}

fn ten_digits(value: &str) -> Result<(), ValidationError> {
    if !is_phone_number(value) {
        let mut error = ValidationError::new("phone_number");
        error.add_param(Cow::from("equal"), &PHONE_NUMBER_LENGTH);
        return Err(error);
    }
    Ok(())
}

fn is_phone_number(value: &str) -> bool {
    value.validate_length(None, None, Some(PHONE_NUMBER_LENGTH))
        && value.chars().all(|c| c.is_ascii_digit())
}

/// Accepts `1990-01-01` as well as a timestamp such as `1990-01-01T00:00:00`
/// or `1990-01-01T00:00:00Z`; the time part is dropped.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid date_of_birth '{}'", raw)))
}
