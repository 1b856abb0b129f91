//! [`SqliteStore`], the SQLite implementation of [`NodeStore`].

use std::path::Path;

use collect_core::{
  dto::{NodeDto, NodeKey},
  store::NodeStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::RawNode,
  schema::{COLUMNS, SCHEMA},
};

const INSERT: &str = "
    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
    ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
    ?31, ?32";

fn insert_sql() -> String {
  format!("INSERT OR REPLACE INTO attribute_nodes ({COLUMNS}) VALUES ({INSERT})")
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attribute node store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── NodeStore impl ──────────────────────────────────────────────────────────

impl NodeStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save(&self, dto: NodeDto) -> Result<()> {
    let raw = RawNode::from_dto(dto)?;
    self
      .conn
      .call(move |conn| {
        conn.execute(&insert_sql(), &raw.params()[..])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn save_all(&self, dtos: Vec<NodeDto>) -> Result<()> {
    let raws = dtos
      .into_iter()
      .map(RawNode::from_dto)
      .collect::<Result<Vec<_>>>()?;
    let count = raws.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&insert_sql())?;
          for raw in &raws {
            stmt.execute(&raw.params()[..])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(rows = count, "saved attribute nodes");
    Ok(())
  }

  async fn replace_record(
    &self,
    survey_id: i32,
    record_id: i32,
    dtos: Vec<NodeDto>,
  ) -> Result<()> {
    // Encode first: a row that cannot be stored must fail before the delete.
    let raws = dtos
      .into_iter()
      .map(RawNode::from_dto)
      .collect::<Result<Vec<_>>>()?;
    let count = raws.len();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute(
          "DELETE FROM attribute_nodes WHERE survey_id = ?1 AND record_id = ?2",
          rusqlite::params![survey_id, record_id],
        )?;
        {
          let mut stmt = tx.prepare(&insert_sql())?;
          for raw in &raws {
            stmt.execute(&raw.params()[..])?;
          }
        }
        tx.commit()?;
        Ok(removed)
      })
      .await?;

    tracing::debug!(
      survey_id,
      record_id,
      removed,
      rows = count,
      "replaced record"
    );
    Ok(())
  }

  async fn delete(&self, key: NodeKey) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM attribute_nodes
           WHERE survey_id = ?1 AND record_id = ?2 AND id = ?3",
          rusqlite::params![key.survey_id, key.record_id, key.id],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn delete_record(&self, survey_id: i32, record_id: i32) -> Result<usize> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM attribute_nodes WHERE survey_id = ?1 AND record_id = ?2",
          rusqlite::params![survey_id, record_id],
        )?)
      })
      .await?;
    tracing::debug!(survey_id, record_id, rows = removed, "deleted record");
    Ok(removed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get(&self, key: NodeKey) -> Result<Option<NodeDto>> {
    let raw: Option<RawNode> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COLUMNS} FROM attribute_nodes
                 WHERE survey_id = ?1 AND record_id = ?2 AND id = ?3"
              ),
              rusqlite::params![key.survey_id, key.record_id, key.id],
              RawNode::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNode::into_dto).transpose()
  }

  async fn load_record(
    &self,
    survey_id: i32,
    record_id: i32,
  ) -> Result<Vec<NodeDto>> {
    let raws: Vec<RawNode> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM attribute_nodes
           WHERE survey_id = ?1 AND record_id = ?2
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![survey_id, record_id], RawNode::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNode::into_dto).collect()
  }

  async fn record_ids(&self, survey_id: i32) -> Result<Vec<i32>> {
    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT record_id FROM attribute_nodes
           WHERE survey_id = ?1
           ORDER BY record_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![survey_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i32>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }
}
