//! Validation error types
//!
//! Each entity implements [`Validate`] and reports every failing field at
//! once, so a client can fix a whole form in one round trip.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Digits only, empty allowed (presence is checked separately)
static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("invalid digits regex"));

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank
    Required,

    /// Field exceeds maximum length
    TooLong { max: usize },

    /// Integer outside the accepted range
    OutOfRange { min: i64, max: i64 },

    /// String doesn't match required format
    InvalidFormat { reason: &'static str },

    /// Value is not one of the accepted choices
    InvalidChoice { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "this field is required"),
            Self::TooLong { max } => {
                write!(f, "exceeds maximum length of {} characters", max)
            }
            Self::OutOfRange { min, max } => {
                write!(f, "must be between {} and {}", min, max)
            }
            Self::InvalidFormat { reason } => write!(f, "{}", reason),
            Self::InvalidChoice { value } => write!(f, "'{}' is not a valid choice", value),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Field-level errors collected while validating one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<ValidationError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against `field`.
    pub fn add(&mut self, field: &'static str, error: ValidationError) {
        self.errors.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Errors recorded for one field.
    pub fn get(&self, field: &str) -> &[ValidationError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Messages keyed by field, the shape returned to HTTP clients.
    pub fn messages(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.errors
            .iter()
            .map(|(field, errs)| (*field, errs.iter().map(ToString::to_string).collect()))
            .collect()
    }

    // Shared field checks

    pub fn require_text(&mut self, field: &'static str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.add(field, ValidationError::Required);
        } else if value.chars().count() > max {
            self.add(field, ValidationError::TooLong { max });
        }
    }

    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.add(field, ValidationError::TooLong { max });
            }
        }
    }

    pub fn digits(&mut self, field: &'static str, value: &str) {
        if !DIGITS_RE.is_match(value) {
            self.add(
                field,
                ValidationError::InvalidFormat {
                    reason: "phone number should only contain digits",
                },
            );
        }
    }

    /// Blank is accepted; anything else must parse as an http(s) URL.
    pub fn optional_url(&mut self, field: &'static str, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        match url::Url::parse(value) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            _ => self.add(
                field,
                ValidationError::InvalidFormat {
                    reason: "invalid URL",
                },
            ),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errs) in &self.errors {
            for err in errs {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, err)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}

/// Explicit validation, one implementation per submitted entity.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}
