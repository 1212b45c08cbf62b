use compact_str::{format_compact, CompactString};
use derive_more::Display;
use std::ops::Deref;

pub const MAX_TEXT_LENGTH: usize = 4096;
pub const MAX_CAPTION_LENGTH: usize = 1024;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Constraint {
    #[display(fmt = "must be at least {} UTF-16 code units long, got {}", min, actual)]
    MinLength { min: usize, actual: usize },
    #[display(fmt = "must be at most {} UTF-16 code units long, got {}", max, actual)]
    MaxLength { max: usize, actual: usize },
    #[display(fmt = "must not be blank")]
    Blank,
    #[display(fmt = "must be within {}..={}, got {}", min, max, actual)]
    OutOfRange { min: i64, max: i64, actual: i64 },
    #[display(fmt = "requires {}", _0)]
    Requires(&'static str),
    #[display(fmt = "is not a known field")]
    UnknownField,
    #[display(fmt = "must be {}", _0)]
    Shape(&'static str),
    #[display(fmt = "matches none of: {}", _0)]
    NoMatchingArm(CompactString),
    #[display(fmt = "is malformed: {}", _0)]
    Malformed(CompactString),
}

/// A request failed a field constraint. Raised before anything is encoded or sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{field}` {constraint}")]
pub struct ValidationError {
    pub field: CompactString,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: impl Into<CompactString>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }

    /// Prefixes the field path with the enclosing field name.
    pub fn within(self, parent: &str) -> Self {
        Self {
            field: format_compact!("{parent}.{}", self.field),
            constraint: self.constraint,
        }
    }
}

pub trait Validate: Sized {
    /// Normalizes string fields in place and checks every constraint.
    fn validate(&mut self) -> Result<(), ValidationError>;

    fn validated(mut self) -> Result<Validated<Self>, ValidationError> {
        self.validate()?;
        Ok(Validated(self))
    }
}

/// A value that passed [`Validate::validate`]. Read-only; changes go through
/// [`Validated::modify`], which validates again.
#[derive(Clone, Debug, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Validate> Validated<T> {
    pub fn modify(self, change: impl FnOnce(&mut T)) -> Result<Self, ValidationError> {
        let mut inner = self.0;
        change(&mut inner);
        inner.validated()
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

/// Length as the server counts it.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn trim(value: &mut CompactString) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = CompactString::from(trimmed);
    }
}

pub fn trim_opt(value: &mut Option<CompactString>) {
    if let Some(value) = value {
        trim(value);
    }
}

/// Message body: trimmed length within `1..=max`, and not whitespace only.
pub fn text(field: &str, value: &mut CompactString, max: usize) -> Result<(), ValidationError> {
    let was_empty = value.is_empty();
    trim(value);
    let actual = utf16_len(value);
    if actual == 0 && !was_empty {
        return Err(ValidationError::new(field, Constraint::Blank));
    }
    if actual < 1 {
        return Err(ValidationError::new(
            field,
            Constraint::MinLength { min: 1, actual },
        ));
    }
    max_length(field, value, max)
}

/// Optional caption: trimmed length at most [`MAX_CAPTION_LENGTH`]. Unset and empty both pass.
pub fn caption(field: &str, value: &mut Option<CompactString>) -> Result<(), ValidationError> {
    match value {
        None => Ok(()),
        Some(value) => {
            trim(value);
            max_length(field, value, MAX_CAPTION_LENGTH)
        }
    }
}

pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = utf16_len(value);
    if actual > max {
        return Err(ValidationError::new(
            field,
            Constraint::MaxLength { max, actual },
        ));
    }
    Ok(())
}

pub fn not_blank(field: &str, value: &mut CompactString) -> Result<(), ValidationError> {
    trim(value);
    if value.is_empty() {
        return Err(ValidationError::new(field, Constraint::Blank));
    }
    Ok(())
}

pub fn range(field: &str, actual: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if !(min..=max).contains(&actual) {
        return Err(ValidationError::new(
            field,
            Constraint::OutOfRange { min, max, actual },
        ));
    }
    Ok(())
}
