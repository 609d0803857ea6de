//! Schema validation for directory payloads.
//!
//! Remote responses arrive as untyped JSON. The functions here walk the value
//! once, collect every schema violation with its field path, and only build a
//! typed [`User`] when the whole record conforms. Required fields must be
//! present with the declared primitive type; optional fields may be absent but
//! never mistyped. Nothing is coerced: `null` is a wrong type and `30.0` is not
//! an integer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::user::{
    Address, Bank, Company, Coordinates, Crypto, Hair, RequiredFields, User, UserDetails, UserId,
};

/// Field names the user schema describes. Anything else lands in
/// [`User::extra`].
const KNOWN_USER_FIELDS: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "age",
    "gender",
    "email",
    "maidenName",
    "password",
    "phone",
    "username",
    "birthDate",
    "image",
    "bloodGroup",
    "height",
    "weight",
    "eyeColor",
    "hair",
    "ip",
    "address",
    "macAddress",
    "university",
    "bank",
    "company",
    "ein",
    "ssn",
    "userAgent",
    "crypto",
    "role",
];

/// Type a field was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedType {
    String,
    Number,
    NonNegativeInteger,
    PositiveInteger,
    Object,
    Array,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::NonNegativeInteger => "non-negative integer",
            Self::PositiveInteger => "positive integer",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(label)
    }
}

/// One field that did not match the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    path: String,
    expected: ExpectedType,
    found: String,
}

impl FieldViolation {
    /// Dotted/indexed path such as `users[3].address.city`; `$` is the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn expected(&self) -> ExpectedType {
        self.expected
    }

    /// Short description of what was present: `missing`, `null`, a JSON type
    /// name, or the literal for numbers.
    #[must_use]
    pub fn found(&self) -> &str {
        &self.found
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

/// A payload failed schema validation.
///
/// Always holds at least one [`FieldViolation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    fn from_violations(violations: Vec<FieldViolation>) -> Self {
        debug_assert!(!violations.is_empty(), "validation error without violations");
        Self { violations }
    }

    /// Every violation found, in document order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Path of the first violation.
    #[must_use]
    pub fn path(&self) -> &str {
        self.violations.first().map_or("$", FieldViolation::path)
    }

    /// Expected type of the first violation.
    #[must_use]
    pub fn expected(&self) -> Option<ExpectedType> {
        self.violations.first().map(FieldViolation::expected)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut violations = self.violations.iter();
        match violations.next() {
            Some(first) => write!(f, "{first}")?,
            None => return f.write_str("schema mismatch"),
        }
        for violation in violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection response: validated users plus advisory paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCollection {
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Validate a single user record.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every field that does not conform.
///
/// # Examples
///
/// ```
/// use directory::domain::validation::validate_user;
/// use serde_json::json;
///
/// let user = validate_user(&json!({
///     "id": 1,
///     "firstName": "Emily",
///     "lastName": "Johnson",
///     "age": 28,
///     "gender": "female",
///     "email": "emily.johnson@x.dummyjson.com",
/// }))
/// .expect("valid user");
/// assert_eq!(user.full_name(), "Emily Johnson");
///
/// let error = validate_user(&json!({ "id": 1 })).expect_err("missing fields");
/// assert_eq!(error.path(), "firstName");
/// ```
pub fn validate_user(value: &Value) -> Result<User, ValidationError> {
    let mut violations = Vec::new();
    let user = read_user(value, &FieldPath::root(), &mut violations);
    finish(user, violations)
}

/// Validate a `{ users, total?, skip?, limit? }` envelope.
///
/// Any invalid element fails the whole collection; violations carry the
/// element index, e.g. `users[2].email`. Metadata that is not a non-negative
/// integer is ignored rather than rejected.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the envelope is not an object, `users`
/// is missing or not an array, or any element is not a valid user.
pub fn validate_collection(value: &Value) -> Result<UserCollection, ValidationError> {
    let root = FieldPath::root();
    let Value::Object(envelope) = value else {
        return Err(ValidationError::from_violations(vec![violation(
            &root,
            ExpectedType::Object,
            Some(value),
        )]));
    };

    let mut violations = Vec::new();
    let users_path = root.key("users");
    let users = match envelope.get("users") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| read_user(item, &users_path.index(index), &mut violations))
            .collect(),
        other => {
            violations.push(violation(&users_path, ExpectedType::Array, other));
            Vec::new()
        }
    };

    let collection = UserCollection {
        users,
        total: envelope.get("total").and_then(Value::as_u64),
        skip: envelope.get("skip").and_then(Value::as_u64),
        limit: envelope.get("limit").and_then(Value::as_u64),
    };
    finish(Some(collection), violations)
}

impl TryFrom<&Value> for User {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        validate_user(value)
    }
}

fn finish<T>(value: Option<T>, violations: Vec<FieldViolation>) -> Result<T, ValidationError> {
    match value {
        Some(value) if violations.is_empty() => Ok(value),
        _ => Err(ValidationError::from_violations(violations)),
    }
}

fn read_user(value: &Value, path: &FieldPath, violations: &mut Vec<FieldViolation>) -> Option<User> {
    let Value::Object(object) = value else {
        violations.push(violation(path, ExpectedType::Object, Some(value)));
        return None;
    };
    let mut reader = ObjectReader {
        object,
        path: path.clone(),
        violations,
    };

    let id = reader.required_id("id");
    let first_name = reader.required_string("firstName");
    let last_name = reader.required_string("lastName");
    let age = reader.required_age("age");
    let gender = reader.required_string("gender");
    let email = reader.required_string("email");

    let details = UserDetails {
        maiden_name: reader.optional_string("maidenName"),
        password: reader.optional_string("password"),
        phone: reader.optional_string("phone"),
        username: reader.optional_string("username"),
        birth_date: reader.optional_string("birthDate"),
        image: reader.optional_string("image"),
        blood_group: reader.optional_string("bloodGroup"),
        height: reader.optional_number("height"),
        weight: reader.optional_number("weight"),
        eye_color: reader.optional_string("eyeColor"),
        hair: reader.optional_object("hair", read_hair),
        ip: reader.optional_string("ip"),
        address: reader.optional_object("address", read_address),
        mac_address: reader.optional_string("macAddress"),
        university: reader.optional_string("university"),
        bank: reader.optional_object("bank", read_bank),
        company: reader.optional_object("company", read_company),
        ein: reader.optional_string("ein"),
        ssn: reader.optional_string("ssn"),
        user_agent: reader.optional_string("userAgent"),
        crypto: reader.optional_object("crypto", read_crypto),
        role: reader.optional_string("role"),
    };

    let extra: BTreeMap<String, Value> = object
        .iter()
        .filter(|(key, _)| !KNOWN_USER_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let required = RequiredFields {
        id: id?,
        first_name: first_name?,
        last_name: last_name?,
        age: age?,
        gender: gender?,
        email: email?,
    };
    Some(User::from_parts(required, details, extra))
}

fn read_hair(reader: &mut ObjectReader<'_, '_>) -> Option<Hair> {
    let color = reader.required_string("color");
    let kind = reader.required_string("type");
    Some(Hair {
        color: color?,
        kind: kind?,
    })
}

fn read_coordinates(reader: &mut ObjectReader<'_, '_>) -> Option<Coordinates> {
    let lat = reader.required_number("lat");
    let lng = reader.required_number("lng");
    Some(Coordinates {
        lat: lat?,
        lng: lng?,
    })
}

fn read_address(reader: &mut ObjectReader<'_, '_>) -> Option<Address> {
    let address = reader.required_string("address");
    let city = reader.required_string("city");
    let state = reader.optional_string("state");
    let postal_code = reader.optional_string("postalCode");
    let country = reader.optional_string("country");
    let coordinates = reader.optional_object("coordinates", read_coordinates);
    Some(Address {
        address: address?,
        city: city?,
        state,
        postal_code,
        country,
        coordinates,
    })
}

fn read_bank(reader: &mut ObjectReader<'_, '_>) -> Option<Bank> {
    Some(Bank {
        card_expire: reader.optional_string("cardExpire"),
        card_number: reader.optional_string("cardNumber"),
        card_type: reader.optional_string("cardType"),
        currency: reader.optional_string("currency"),
        iban: reader.optional_string("iban"),
    })
}

fn read_company(reader: &mut ObjectReader<'_, '_>) -> Option<Company> {
    Some(Company {
        department: reader.optional_string("department"),
        name: reader.optional_string("name"),
        title: reader.optional_string("title"),
        address: reader.optional_object("address", read_address),
    })
}

fn read_crypto(reader: &mut ObjectReader<'_, '_>) -> Option<Crypto> {
    Some(Crypto {
        coin: reader.optional_string("coin"),
        wallet: reader.optional_string("wallet"),
        network: reader.optional_string("network"),
    })
}

/// Path to a field inside the payload being validated.
#[derive(Debug, Clone, Default)]
struct FieldPath(String);

impl FieldPath {
    fn root() -> Self {
        Self::default()
    }

    fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_owned())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    fn render(&self) -> String {
        if self.0.is_empty() {
            "$".to_owned()
        } else {
            self.0.clone()
        }
    }
}

/// Reads typed fields out of one JSON object, recording violations as it
/// goes. Accessors return `None` when the field is absent or mistyped; the
/// caller only assembles a value once every field has been read.
struct ObjectReader<'a, 'v> {
    object: &'a Map<String, Value>,
    path: FieldPath,
    violations: &'v mut Vec<FieldViolation>,
}

impl<'a> ObjectReader<'a, '_> {
    fn reject(&mut self, key: &str, expected: ExpectedType, found: Option<&Value>) {
        self.violations
            .push(violation(&self.path.key(key), expected, found));
    }

    fn required<T>(
        &mut self,
        key: &str,
        expected: ExpectedType,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let object: &'a Map<String, Value> = self.object;
        let found = object.get(key);
        let value = found.and_then(extract);
        if value.is_none() {
            self.reject(key, expected, found);
        }
        value
    }

    fn optional<T>(
        &mut self,
        key: &str,
        expected: ExpectedType,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let object: &'a Map<String, Value> = self.object;
        let found = object.get(key)?;
        let value = extract(found);
        if value.is_none() {
            self.reject(key, expected, Some(found));
        }
        value
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        self.required(key, ExpectedType::String, string_value)
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        self.optional(key, ExpectedType::String, string_value)
    }

    fn required_number(&mut self, key: &str) -> Option<f64> {
        self.required(key, ExpectedType::Number, number_value)
    }

    fn optional_number(&mut self, key: &str) -> Option<f64> {
        self.optional(key, ExpectedType::Number, number_value)
    }

    fn required_id(&mut self, key: &str) -> Option<UserId> {
        self.required(key, ExpectedType::PositiveInteger, |value| {
            value.as_u64().and_then(UserId::from_u64)
        })
    }

    fn required_age(&mut self, key: &str) -> Option<u32> {
        self.required(key, ExpectedType::NonNegativeInteger, |value| {
            value.as_u64().and_then(|age| u32::try_from(age).ok())
        })
    }

    fn optional_object<T>(
        &mut self,
        key: &str,
        read: fn(&mut ObjectReader<'_, '_>) -> Option<T>,
    ) -> Option<T> {
        let object: &'a Map<String, Value> = self.object;
        match object.get(key)? {
            Value::Object(object) => {
                let mut nested = ObjectReader {
                    object,
                    path: self.path.key(key),
                    violations: &mut *self.violations,
                };
                read(&mut nested)
            }
            other => {
                self.reject(key, ExpectedType::Object, Some(other));
                None
            }
        }
    }
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn number_value(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn violation(path: &FieldPath, expected: ExpectedType, found: Option<&Value>) -> FieldViolation {
    FieldViolation {
        path: path.render(),
        expected,
        found: describe(found),
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_owned(),
        Some(Value::Null) => "null".to_owned(),
        Some(Value::Bool(_)) => "boolean".to_owned(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(_)) => "string".to_owned(),
        Some(Value::Array(_)) => "array".to_owned(),
        Some(Value::Object(_)) => "object".to_owned(),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
