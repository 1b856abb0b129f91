//! Error types for `collect-core`.

use thiserror::Error;

use crate::AttributeKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported attribute kind: {0:?}")]
  UnsupportedKind(String),

  #[error("definition {definition_id} ({name}) is neither integer nor real")]
  UnspecifiedNumericType { definition_id: i32, name: String },

  #[error("attribute {attribute_id}: expected a {expected} value, found {found}")]
  KindMismatch {
    attribute_id: i32,
    expected:     AttributeKind,
    found:        AttributeKind,
  },

  #[error("definition not found: {0}")]
  DefinitionNotFound(i32),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// True when the schema and the code disagree about what kinds exist.
  ///
  /// These are never the user's fault and must not be reported as field
  /// validation problems.
  pub fn is_schema_mismatch(&self) -> bool {
    matches!(
      self,
      Self::UnsupportedKind(_)
        | Self::UnspecifiedNumericType { .. }
        | Self::KindMismatch { .. }
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
