//! Per-field validation results.
//!
//! Bad user input never fails a conversion. It is reported as a
//! [`FieldValidationError`] next to whatever part of the value could still be
//! converted, so the UI can flag the offending field and keep the rest.

use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
  #[error("{input:?} is not a valid {expected}")]
  Malformed {
    input:    String,
    expected: &'static str,
  },

  #[error("{value} is outside {min}..={max}")]
  OutOfRange { value: i64, min: i64, max: i64 },

  #[error("{value} exceeds the maximum of {max}")]
  TooLarge { value: u64, max: u64 },

  #[error("no such calendar date")]
  NoSuchDate,

  #[error("{missing} is required when {present} is set")]
  Incomplete {
    missing: &'static str,
    present: &'static str,
  },

  #[error("unit {0:?} is not declared for this attribute")]
  UndeclaredUnit(String),

  #[error("code list does not allow a qualifier")]
  QualifierNotAllowed,

  #[error("lower bound is greater than upper bound")]
  InvertedRange,

  #[error("file path {0:?} must be relative to the survey directory")]
  UnsafePath(String),
}

/// A validation issue located on one field of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attribute {attribute_id}, {field}: {issue}")]
pub struct FieldValidationError {
  pub attribute_id: i32,
  /// Component of the value, e.g. `"day"` or `"to"`.
  pub field:        &'static str,
  pub issue:        ValidationIssue,
}

/// A best-effort conversion: the value built from every field that parsed,
/// plus the errors for the fields that did not.
///
/// `value == None` with no errors is the ordinary "unset" state.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
  pub value:  Option<T>,
  pub errors: Vec<FieldValidationError>,
}

impl<T> Conversion<T> {
  pub fn unset() -> Self {
    Self {
      value:  None,
      errors: Vec::new(),
    }
  }

  pub fn valid(value: T) -> Self {
    Self {
      value:  Some(value),
      errors: Vec::new(),
    }
  }

  pub fn is_valid(&self) -> bool { self.errors.is_empty() }

  pub fn is_unset(&self) -> bool {
    self.value.is_none() && self.errors.is_empty()
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
    Conversion {
      value:  self.value.map(f),
      errors: self.errors,
    }
  }
}

/// Collects field errors for one attribute while its fields are parsed.
#[derive(Debug)]
pub struct FieldErrors {
  attribute_id: i32,
  errors:       Vec<FieldValidationError>,
}

impl FieldErrors {
  pub fn new(attribute_id: i32) -> Self {
    Self {
      attribute_id,
      errors: Vec::new(),
    }
  }

  pub fn push(&mut self, field: &'static str, issue: ValidationIssue) {
    self.errors.push(FieldValidationError {
      attribute_id: self.attribute_id,
      field,
      issue,
    });
  }

  /// Keep `Ok` values; record `Err` issues against `field` and drop them.
  pub fn check<T>(
    &mut self,
    field: &'static str,
    result: Result<T, ValidationIssue>,
  ) -> Option<T> {
    match result {
      Ok(v) => Some(v),
      Err(issue) => {
        self.push(field, issue);
        None
      }
    }
  }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  pub fn finish<T>(self, value: Option<T>) -> Conversion<T> {
    Conversion {
      value,
      errors: self.errors,
    }
  }
}
