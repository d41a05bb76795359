//! Request validation.
//!
//! Payloads are checked field by field against a schema before any handler
//! logic runs. Every violated constraint is collected, in schema order, and
//! reported together as one `InvalidInput` error.

pub mod schemas;

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::variant_names;

pub use schemas::{
    AssignPersonRequest, CompanyPatch, LoginRequest, NewCompany, NewPerson, PersonPatch,
    RegisterRequest,
};

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Presence state of an optional payload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Key not supplied
    Absent,
    /// Supplied as `null` (or an empty string for email/URL fields)
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }
}

/// A request body schema
pub trait Validate: Sized {
    /// Read every field through the validator. Returns `None` only when an
    /// error has been recorded.
    fn validate(v: &mut Validator<'_>) -> Option<Self>;
}

/// Validate a JSON payload against schema `T`.
pub fn validate<T: Validate>(payload: &Value) -> Result<T, ApiError> {
    let mut validator = Validator::new(payload)?;
    let parsed = T::validate(&mut validator);
    validator.finish(parsed)
}

/// Field-level checks over a JSON object, accumulating errors
pub struct Validator<'a> {
    payload: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Validator<'a> {
    pub fn new(payload: &'a Value) -> Result<Self, ApiError> {
        match payload.as_object() {
            Some(map) => Ok(Self {
                payload: map,
                errors: Vec::new(),
            }),
            None => Err(ApiError::invalid_field("body", "Expected a JSON object")),
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Any string, or null.
    pub fn string(&mut self, field: &str) -> Field<String> {
        match self.payload.get(field) {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(Value::String(s)) => Field::Value(s.clone()),
            Some(other) => {
                self.fail(field, format!("Expected string, received {}", json_kind(other)));
                Field::Absent
            }
        }
    }

    /// A non-null string of at least `min` characters.
    pub fn string_min(&mut self, field: &str, min: usize, message: &str) -> Field<String> {
        match self.string(field) {
            Field::Value(s) if s.chars().count() < min => {
                self.fail(field, message);
                Field::Absent
            }
            Field::Null => {
                self.fail(field, "Expected string, received null");
                Field::Absent
            }
            other => other,
        }
    }

    /// An email address; the empty string counts as null.
    pub fn email(&mut self, field: &str) -> Field<String> {
        match self.string(field) {
            Field::Value(s) if s.is_empty() => Field::Null,
            Field::Value(s) if !looks_like_email(&s) => {
                self.fail(field, "Invalid email address");
                Field::Absent
            }
            other => other,
        }
    }

    /// An absolute URL; the empty string counts as null.
    pub fn url(&mut self, field: &str) -> Field<String> {
        match self.string(field) {
            Field::Value(s) if s.is_empty() => Field::Null,
            Field::Value(s) if url::Url::parse(&s).is_err() => {
                self.fail(field, "Invalid URL");
                Field::Absent
            }
            other => other,
        }
    }

    /// Membership in an enumeration, matched on the wire name.
    pub fn one_of<E>(&mut self, field: &str, all: &[E]) -> Field<E>
    where
        E: FromStr + Display,
    {
        match self.string(field) {
            Field::Value(s) => match s.parse::<E>() {
                Ok(v) => Field::Value(v),
                Err(_) => {
                    self.fail(
                        field,
                        format!("Invalid option: expected one of {}", variant_names(all)),
                    );
                    Field::Absent
                }
            },
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    /// An integer in `min..=max`, or null. A float with no fractional part
    /// (`2.0`) counts as an integer.
    pub fn integer_between(&mut self, field: &str, min: i64, max: i64) -> Field<i32> {
        match self.payload.get(field) {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(Value::Number(n)) => match n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            {
                Some(i) if (min..=max).contains(&i) => Field::Value(i as i32),
                Some(_) => {
                    self.fail(field, format!("Must be between {} and {}", min, max));
                    Field::Absent
                }
                None => {
                    self.fail(field, "Expected integer, received float");
                    Field::Absent
                }
            },
            Some(other) => {
                self.fail(field, format!("Expected number, received {}", json_kind(other)));
                Field::Absent
            }
        }
    }

    /// A UUID in its canonical hyphenated text form.
    pub fn uuid(&mut self, field: &str, message: &str) -> Field<Uuid> {
        match self.string(field) {
            Field::Value(s) => match Uuid::parse_str(&s) {
                Ok(id) if s.len() == 36 => Field::Value(id),
                _ => {
                    self.fail(field, message);
                    Field::Absent
                }
            },
            other => other.map(|_| Uuid::nil()),
        }
    }

    /// Reject an explicit null for a field that cannot be cleared.
    pub fn not_null<T>(&mut self, field: &str, value: Field<T>) -> Field<T> {
        match value {
            Field::Null => {
                self.fail(field, "Expected value, received null");
                Field::Absent
            }
            other => other,
        }
    }

    /// Turn a field into a required value, recording "Required" when it is
    /// missing and no other error was already reported for it.
    pub fn require<T>(&mut self, field: &str, value: Field<T>) -> Option<T> {
        match value {
            Field::Value(v) => Some(v),
            _ => {
                if !self.has_error(field) {
                    self.fail(field, "Required");
                }
                None
            }
        }
    }

    pub fn finish<T>(self, parsed: Option<T>) -> Result<T, ApiError> {
        match parsed {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ApiError::invalid_input(self.errors)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
