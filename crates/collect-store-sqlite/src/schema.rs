//! SQL schema for the attribute node store.
//!
//! Executed once at connection startup. Migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per attribute. Only the value columns of the row's kind are set.
CREATE TABLE IF NOT EXISTS attribute_nodes (
    survey_id            INTEGER NOT NULL,
    record_id            INTEGER NOT NULL,
    id                   INTEGER NOT NULL,
    definition_id        INTEGER NOT NULL,
    parent_id            INTEGER,          -- NULL under the record root
    kind                 TEXT    NOT NULL, -- attribute kind tag
    record_key_attribute INTEGER NOT NULL DEFAULT 0,
    status               TEXT,

    text                 TEXT,
    year                 INTEGER,
    month                INTEGER,
    day                  INTEGER,
    hour                 INTEGER,
    minute               INTEGER,
    code                 TEXT,
    qualifier            TEXT,
    srs                  TEXT,
    x                    REAL,
    y                    REAL,
    file_name            TEXT,
    file_size            INTEGER,
    taxon_code           TEXT,
    scientific_name      TEXT,
    vernacular_name      TEXT,
    boolean              INTEGER,
    int_value            INTEGER,
    real_value           REAL,
    int_from             INTEGER,
    int_to               INTEGER,
    real_from            REAL,
    real_to              REAL,
    unit                 TEXT,

    PRIMARY KEY (survey_id, record_id, id)
);

CREATE INDEX IF NOT EXISTS attribute_nodes_definition_idx
    ON attribute_nodes(survey_id, definition_id);

PRAGMA user_version = 1;
";

/// Column order shared by every `SELECT` and `INSERT` against
/// `attribute_nodes`; [`crate::encode::RawNode`] reads and writes in this
/// order.
pub const COLUMNS: &str = "
    survey_id, record_id, id, definition_id, parent_id, kind,
    record_key_attribute, status,
    text, year, month, day, hour, minute, code, qualifier, srs, x, y,
    file_name, file_size, taxon_code, scientific_name, vernacular_name,
    boolean, int_value, real_value, int_from, int_to, real_from, real_to, unit";
