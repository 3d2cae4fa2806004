//! Field kinds, presence rules and refinement constraints.

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use serde_json::Value;

use super::violation::{FieldViolation, ViolationCode};

/// Date columns are ISO calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time columns accept `HH:MM:SS` and `HH:MM`.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse a time-of-day column value in any accepted format.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// JSON shape a field must have, mirroring its storage column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON integer within the 64-bit signed range (`bigint`/`bigserial`).
    Integer,
    /// JSON integer within the 32-bit signed range (`integer`).
    Int32,
    /// Any JSON number.
    Number,
    Text,
    /// A string drawn from a fixed set of values.
    Enum(&'static [&'static str]),
    /// `YYYY-MM-DD`.
    Date,
    /// `HH:MM` or `HH:MM:SS`.
    Time,
    /// RFC 3339 timestamp.
    Timestamp,
    /// JSON array whose every element has the inner kind.
    Array(&'static FieldKind),
}

impl FieldKind {
    fn describe(self) -> String {
        match self {
            Self::Integer => "integer".to_string(),
            Self::Int32 => "32-bit integer".to_string(),
            Self::Number => "number".to_string(),
            Self::Text | Self::Enum(_) => "string".to_string(),
            Self::Date => "date (YYYY-MM-DD)".to_string(),
            Self::Time => "time (HH:MM[:SS])".to_string(),
            Self::Timestamp => "RFC 3339 timestamp".to_string(),
            Self::Array(inner) => format!("array of {}", inner.describe()),
        }
    }

    /// Check that `value` (non-null) has this kind.
    pub fn check(self, field: &str, value: &Value) -> Option<FieldViolation> {
        let invalid_type = || {
            FieldViolation::new(
                field,
                ViolationCode::InvalidType,
                format!("Expected {}, received {}", self.describe(), json_type(value)),
            )
        };

        match self {
            Self::Integer => match value {
                Value::Number(n) if n.is_i64() => None,
                Value::Number(n) if n.is_u64() => Some(out_of_range(field, i64::MIN, i64::MAX)),
                _ => Some(invalid_type()),
            },
            Self::Int32 => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => n
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .is_none()
                    .then(|| out_of_range(field, i32::MIN.into(), i32::MAX.into())),
                _ => Some(invalid_type()),
            },
            Self::Number => (!value.is_number()).then(invalid_type),
            Self::Text => (!value.is_string()).then(invalid_type),
            Self::Enum(allowed) => {
                let s = match value.as_str() {
                    Some(s) => s,
                    None => return Some(invalid_type()),
                };
                (!allowed.contains(&s)).then(|| {
                    FieldViolation::new(
                        field,
                        ViolationCode::InvalidEnum,
                        format!("Must be one of: {}", allowed.join(", ")),
                    )
                })
            }
            Self::Date => {
                let s = match value.as_str() {
                    Some(s) => s,
                    None => return Some(invalid_type()),
                };
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .is_err()
                    .then(|| invalid_format(field, self))
            }
            Self::Time => {
                let s = match value.as_str() {
                    Some(s) => s,
                    None => return Some(invalid_type()),
                };
                parse_time_of_day(s)
                    .is_none()
                    .then(|| invalid_format(field, self))
            }
            Self::Timestamp => {
                let s = match value.as_str() {
                    Some(s) => s,
                    None => return Some(invalid_type()),
                };
                DateTime::parse_from_rfc3339(s)
                    .is_err()
                    .then(|| invalid_format(field, self))
            }
            Self::Array(inner) => {
                let items = match value.as_array() {
                    Some(items) => items,
                    None => return Some(invalid_type()),
                };
                items.iter().enumerate().find_map(|(i, item)| {
                    inner.check(field, item).map(|mut v| {
                        v.message = format!("Element {i}: {}", v.message);
                        v
                    })
                })
            }
        }
    }
}

fn invalid_format(field: &str, kind: FieldKind) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationCode::InvalidFormat,
        format!("Expected {}", kind.describe()),
    )
}

fn out_of_range(field: &str, min: i64, max: i64) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationCode::OutOfRange,
        format!("Must be between {min} and {max}"),
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-null.
    Required,
    /// Must be present; `null` is accepted (a nullable column made required).
    RequiredNullable,
    /// May be omitted; `null` is rejected.
    Optional,
    /// May be omitted or `null` (nullable column).
    Nullable,
}

/// One column of a canonical entity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldDef {
    /// NOT NULL column without a default.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    /// NOT NULL column with a default (serial ids, `now()`, enum defaults).
    pub const fn defaulted(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Nullable,
        }
    }
}

/// Extra per-field refinement applied on top of the kind check.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Numeric value strictly greater than zero.
    Positive,
    /// At most this many characters.
    MaxLength(usize),
    /// String must match the regex.
    Pattern(Regex),
}

impl Constraint {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Check a value that already passed its kind check. Constraints that do
    /// not apply to the value's JSON type pass.
    pub fn check(&self, field: &str, value: &Value) -> Option<FieldViolation> {
        match self {
            Self::Positive => {
                let n = value.as_f64()?;
                (n <= 0.0).then(|| {
                    FieldViolation::new(field, ViolationCode::NotPositive, "Must be greater than 0")
                })
            }
            Self::MaxLength(max) => {
                let s = value.as_str()?;
                (s.chars().count() > *max).then(|| {
                    FieldViolation::new(
                        field,
                        ViolationCode::TooLong,
                        format!("Must contain at most {max} character(s)"),
                    )
                })
            }
            Self::Pattern(re) => {
                let s = value.as_str()?;
                (!re.is_match(s)).then(|| {
                    FieldViolation::new(
                        field,
                        ViolationCode::PatternMismatch,
                        format!("Must match pattern {}", re.as_str()),
                    )
                })
            }
        }
    }
}
