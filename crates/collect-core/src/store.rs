//! The `NodeStore` trait.
//!
//! Implemented by storage backends (e.g. `collect-store-sqlite`). The bridge
//! itself never touches storage; callers hand it the rows a store returns and
//! store the rows it produces.

use std::future::Future;

use crate::dto::{NodeDto, NodeKey};

/// Abstraction over a backend holding persisted attribute rows.
///
/// Rows are keyed by (survey id, record id, attribute id). All methods return
/// `Send` futures so the trait can be used in multi-threaded async runtimes.
pub trait NodeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a row, replacing any row with the same key.
  fn save(
    &self,
    dto: NodeDto,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert or replace several rows atomically.
  fn save_all(
    &self,
    dtos: Vec<NodeDto>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace every row of a record with `dtos` atomically. On failure the
  /// record keeps the rows it had.
  fn replace_record(
    &self,
    survey_id: i32,
    record_id: i32,
    dtos: Vec<NodeDto>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a row by key. Returns `None` if not found.
  fn get(
    &self,
    key: NodeKey,
  ) -> impl Future<Output = Result<Option<NodeDto>, Self::Error>> + Send + '_;

  /// All rows of one record, ordered by attribute id.
  fn load_record(
    &self,
    survey_id: i32,
    record_id: i32,
  ) -> impl Future<Output = Result<Vec<NodeDto>, Self::Error>> + Send + '_;

  /// Delete a row. Returns whether a row was removed.
  fn delete(
    &self,
    key: NodeKey,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete every row of a record. Returns the number of rows removed.
  fn delete_record(
    &self,
    survey_id: i32,
    record_id: i32,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Ids of the records that have at least one row, ascending.
  fn record_ids(
    &self,
    survey_id: i32,
  ) -> impl Future<Output = Result<Vec<i32>, Self::Error>> + Send + '_;
}
