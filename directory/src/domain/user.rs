//! User data model.
//!
//! Records are only ever produced by the validator in
//! [`crate::domain::validation`], so every [`User`] in memory is known to match
//! the directory schema. Fields are read-only once constructed.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors returned when constructing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// Identifiers are positive integers.
    #[error("user id must be a positive integer, got {value}")]
    NotPositive { value: i64 },
    /// The input was not an integer at all.
    #[error("user id must be a positive integer, got {input:?}")]
    NotNumeric { input: String },
}

/// Stable positive user identifier assigned by the directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Validate a signed integer as a user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError::NotPositive`] for zero and negative values.
    pub fn new(value: i64) -> Result<Self, UserIdError> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(UserIdError::NotPositive { value })
    }

    /// Construct from an unsigned integer, rejecting zero.
    #[must_use]
    pub fn from_u64(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Return the identifier as a plain integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|_| UserIdError::NotNumeric {
            input: s.to_owned(),
        })?;
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Hair description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hair {
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Geographic coordinates of an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Postal address, used both for the user and their company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Payment card and account details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_expire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
}

/// Employer details.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Crypto wallet details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crypto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Optional scalar attributes of a user.
///
/// Absence is always valid; the validator only guarantees that present values
/// had the declared type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair: Option<Hair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crypto: Option<Crypto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A validated directory user.
///
/// Serialises back to the camelCase wire shape, with fields the schema does not
/// know about flattened in from [`User::extra`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    age: u32,
    gender: String,
    email: String,
    #[serde(flatten)]
    details: UserDetails,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Required fields of a [`User`].
#[derive(Debug, Clone)]
pub(crate) struct RequiredFields {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub email: String,
}

impl User {
    pub(crate) fn from_parts(
        required: RequiredFields,
        details: UserDetails,
        extra: BTreeMap<String, Value>,
    ) -> Self {
        let RequiredFields {
            id,
            first_name,
            last_name,
            age,
            gender,
            email,
        } = required;
        Self {
            id,
            first_name,
            last_name,
            age,
            gender,
            email,
            details,
            extra,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"firstName lastName"`, the text used for name search and sorting.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Optional attributes.
    #[must_use]
    pub const fn details(&self) -> &UserDetails {
        &self.details
    }

    /// Fields present in the payload that the schema does not describe.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    //! Identifier parsing and serialisation shape.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::validation::validate_user;

    #[rstest]
    #[case::one(1, 1)]
    #[case::large(i64::MAX, 9_223_372_036_854_775_807)]
    fn accepts_positive_ids(#[case] raw: i64, #[case] expected: u64) {
        let id = UserId::new(raw).expect("positive id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-5)]
    fn rejects_non_positive_ids(#[case] raw: i64) {
        assert_eq!(
            UserId::new(raw),
            Err(UserIdError::NotPositive { value: raw })
        );
    }

    #[rstest]
    #[case::plain("42", 42)]
    #[case::padded(" 7 ", 7)]
    fn parses_ids_from_text(#[case] raw: &str, #[case] expected: u64) {
        let id: UserId = raw.parse().expect("numeric id");
        assert_eq!(id.get(), expected);
    }

    #[test]
    fn display_honours_width_and_alignment() {
        let id = UserId::new(3).expect("positive id");

        assert_eq!(format!("{id:>4}|{id:<3}|{id}"), "   3|3  |3");
    }

    #[rstest]
    #[case::word("abc")]
    #[case::fraction("1.5")]
    #[case::empty("")]
    fn rejects_non_numeric_text(#[case] raw: &str) {
        let error = raw.parse::<UserId>().expect_err("non-numeric id");
        assert!(matches!(error, UserIdError::NotNumeric { .. }));
    }

    #[test]
    fn negative_text_is_reported_as_not_positive() {
        let error = "-3".parse::<UserId>().expect_err("negative id");
        assert_eq!(error, UserIdError::NotPositive { value: -3 });
    }

    #[test]
    fn serialises_back_to_wire_shape_with_extra_fields() {
        let raw = json!({
            "id": 3,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "age": 36,
            "gender": "female",
            "email": "ada@example.com",
            "hair": { "color": "Brown", "type": "Wavy" },
            "favouriteEngine": "analytical",
        });
        let user = validate_user(&raw).expect("valid user");

        let serialised = serde_json::to_value(&user).expect("serialise user");

        assert_eq!(serialised, raw);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(
            user.extra().get("favouriteEngine"),
            Some(&json!("analytical"))
        );
    }
}
