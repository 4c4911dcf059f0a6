//! SQLite record store implementation

use crate::storage::traits::{RecordStore, StoreError, StoreResult};
use crate::storage::AnalysisRecord;
use crate::verifier::BrokenLink;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite-backed record store
pub struct SqliteStore {
    conn: Connection,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS analyses (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        url             TEXT NOT NULL,
        title           TEXT NOT NULL DEFAULT '',
        html_version    TEXT NOT NULL DEFAULT '',
        internal_links  INTEGER NOT NULL DEFAULT 0,
        external_links  INTEGER NOT NULL DEFAULT 0,
        status          TEXT NOT NULL,
        login_form      INTEGER NOT NULL DEFAULT 0,
        broken_links    TEXT NOT NULL DEFAULT '[]',
        valid_from      TEXT NOT NULL,
        valid_until     TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_analyses_valid_from ON analyses(valid_from DESC);
";

impl SqliteStore {
    /// Opens (creating if needed) the record store at the given path
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for concurrent readers alongside the writer
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        conn.execute_batch(SCHEMA)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<(AnalysisRecord, String)> {
        let broken_links_json: String = row.get(8)?;
        let valid_from: String = row.get(9)?;
        let valid_until: String = row.get(10)?;

        let record = AnalysisRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            html_version: row.get(3)?,
            internal_links: row.get(4)?,
            external_links: row.get(5)?,
            status: row.get(6)?,
            login_form: row.get(7)?,
            broken_links: Vec::new(),
            valid_from: parse_timestamp_or_epoch(&valid_from),
            valid_until: parse_timestamp_or_epoch(&valid_until),
        };

        Ok((record, broken_links_json))
    }
}

const SELECT_COLUMNS: &str = "id, url, title, html_version, internal_links, external_links,
     status, login_form, broken_links, valid_from, valid_until";

fn parse_timestamp_or_epoch(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}

fn decode_findings(json: &str) -> StoreResult<Vec<BrokenLink>> {
    Ok(serde_json::from_str(json)?)
}

impl RecordStore for SqliteStore {
    fn create(&mut self, record: &AnalysisRecord) -> StoreResult<i64> {
        let broken_links = serde_json::to_string(&record.broken_links)?;
        self.conn.execute(
            "INSERT INTO analyses
                (url, title, html_version, internal_links, external_links,
                 status, login_form, broken_links, valid_from, valid_until)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.url,
                record.title,
                record.html_version,
                record.internal_links,
                record.external_links,
                record.status,
                record.login_form,
                broken_links,
                record.valid_from.to_rfc3339(),
                record.valid_until.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: i64) -> StoreResult<AnalysisRecord> {
        let sql = format!("SELECT {} FROM analyses WHERE id = ?1", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let found = stmt
            .query_row(params![id], Self::record_from_row)
            .optional()?;

        let (mut record, broken_links_json) = found.ok_or(StoreError::NotFound(id))?;
        record.broken_links = decode_findings(&broken_links_json)?;
        Ok(record)
    }

    fn update(&mut self, record: &AnalysisRecord) -> StoreResult<()> {
        let broken_links = serde_json::to_string(&record.broken_links)?;
        let changed = self.conn.execute(
            "UPDATE analyses SET
                url = ?1, title = ?2, html_version = ?3, internal_links = ?4,
                external_links = ?5, status = ?6, login_form = ?7,
                broken_links = ?8, valid_from = ?9, valid_until = ?10
             WHERE id = ?11",
            params![
                record.url,
                record.title,
                record.html_version,
                record.internal_links,
                record.external_links,
                record.status,
                record.login_form,
                broken_links,
                record.valid_from.to_rfc3339(),
                record.valid_until.to_rfc3339(),
                record.id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<AnalysisRecord>> {
        let sql = format!(
            "SELECT {} FROM analyses ORDER BY valid_from DESC, id DESC",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], Self::record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            let (mut record, broken_links_json) = row?;
            record.broken_links = decode_findings(&broken_links_json)?;
            records.push(record);
        }
        Ok(records)
    }

    fn delete(&mut self, id: i64) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM analyses WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
