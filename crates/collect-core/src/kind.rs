//! The closed set of attribute kinds.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Every kind of leaf attribute a survey can declare.
///
/// The snake_case name is the tag stored in the `kind` column of persisted
/// rows. Adding a variant requires a matching converter; the compiler enforces
/// that through the exhaustive dispatch in `collect-convert`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKind {
  Text,
  Date,
  Time,
  Code,
  Coordinate,
  File,
  Taxon,
  Boolean,
  Integer,
  Real,
  IntegerRange,
  RealRange,
}

impl AttributeKind {
  /// The tag stored in persisted rows.
  pub fn tag(self) -> &'static str { self.into() }

  /// Parse a persisted tag. Unknown tags mean the stored data was written by
  /// a schema this build does not know about.
  pub fn from_tag(tag: &str) -> Result<Self> {
    tag.parse().map_err(|_| Error::UnsupportedKind(tag.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn tags_are_snake_case() {
    assert_eq!(AttributeKind::IntegerRange.tag(), "integer_range");
    assert_eq!(AttributeKind::Text.to_string(), "text");
  }

  #[test]
  fn every_tag_parses_back() {
    for kind in AttributeKind::iter() {
      assert_eq!(AttributeKind::from_tag(kind.tag()).unwrap(), kind);
    }
  }

  #[test]
  fn unknown_tag_is_rejected() {
    let err = AttributeKind::from_tag("polygon").unwrap_err();
    assert!(matches!(err, Error::UnsupportedKind(ref t) if t == "polygon"));
    assert!(err.is_schema_mismatch());
  }

  #[test]
  fn serde_uses_the_same_tag() {
    let json = serde_json::to_string(&AttributeKind::RealRange).unwrap();
    assert_eq!(json, "\"real_range\"");
  }
}
