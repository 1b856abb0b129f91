//! Core types for the Open Foris Collect attribute bridge.
//!
//! Survey definitions, domain values, view-model attributes and the flat rows
//! they are persisted as all live here. No UI or database dependencies; the
//! converters and storage backends depend on this crate.

pub mod attribute;
pub mod definition;
pub mod dto;
pub mod error;
pub mod kind;
pub mod store;
pub mod ui;
pub mod validation;
pub mod value;

pub use error::{Error, Result};
pub use kind::AttributeKind;
