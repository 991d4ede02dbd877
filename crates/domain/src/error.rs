// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when parsing domain values from their string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Pass type is not `short` or `long`.
    InvalidPassType(String),
    /// Pass status string is not a known lifecycle state.
    InvalidPassStatus {
        /// The rejected status string.
        status: String,
    },
    /// An identifier was empty.
    EmptyIdentifier(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPassType(value) => {
                write!(f, "Invalid pass type '{value}': expected 'short' or 'long'")
            }
            Self::InvalidPassStatus { status } => write!(f, "Invalid pass status: {status}"),
            Self::EmptyIdentifier(kind) => write!(f, "{kind} cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}

/// A single field-level validation failure.
///
/// `field` is the wire name of the offending submission field (e.g. `returnDate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The submission field path.
    pub field: String,
    /// A human-readable message suitable for re-prompting.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: String::from(field),
            message: String::from(message),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found while validating one input.
///
/// Validation never stops at the first failure, so a caller can show all
/// problems with a submission at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a collection holding exactly one error.
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Records a violation for `field`.
    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the recorded violations in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Returns the first violation recorded against `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Returns true if any violation was recorded against `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }

    /// Converts the collection into a result, yielding `value` when empty.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one violation was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "Validation failed: {}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
