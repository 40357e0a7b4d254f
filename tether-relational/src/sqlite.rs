//! SQLite implementation of the relational store.
//!
//! Records live in a single `records` table as typed JSON blobs. The
//! remote key column carries the cross-store link and is UNIQUE, so a
//! duplicate pairing is rejected by the database itself.

use crate::error::{RelationalError, RelationalResult};
use crate::store::RelationalStore;
use rusqlite::{Connection, params};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Mutex;
use tether_types::{EntityRecord, RecordId, RemoteKey};
use tracing::debug;

struct Inner {
    conn: Connection,
    in_tx: bool,
}

/// Relational store backed by SQLite.
pub struct SqliteStore {
    inner: Mutex<Inner>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn new(path: impl AsRef<Path>) -> RelationalResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            inner: Mutex::new(Inner { conn, in_tx: false }),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> RelationalResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            inner: Mutex::new(Inner { conn, in_tx: false }),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> RelationalResult<()> {
        let inner = self.inner.lock().unwrap();
        inner.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entity_type TEXT NOT NULL,
                remote_key TEXT NOT NULL UNIQUE,
                fields TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_records_entity_type
                ON records (entity_type);
            ",
        )?;
        Ok(())
    }

    /// Returns the number of stored records of one entity type.
    pub fn count(&self, entity_type: &str) -> RelationalResult<usize> {
        let inner = self.inner.lock().unwrap();
        let count: i64 = inner.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE entity_type = ?1",
            params![entity_type],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn begin(inner: &mut Inner) -> RelationalResult<()> {
    if !inner.in_tx {
        inner.conn.execute_batch("BEGIN")?;
        inner.in_tx = true;
    }
    Ok(())
}

fn rollback(inner: &mut Inner) {
    if inner.in_tx {
        let _ = inner.conn.execute_batch("ROLLBACK");
        inner.in_tx = false;
    }
}

fn row_to_record(
    id: i64,
    entity_type: String,
    remote_key: String,
    fields_json: String,
    created_at: i64,
) -> RelationalResult<EntityRecord> {
    let fields: Map<String, Value> = serde_json::from_str(&fields_json)?;
    Ok(EntityRecord {
        id: RecordId::new(id),
        entity_type,
        remote_key: RemoteKey::new(remote_key),
        fields,
        created_at,
    })
}

impl RelationalStore for SqliteStore {
    fn insert(
        &self,
        entity_type: &str,
        remote_key: &RemoteKey,
        fields: &Map<String, Value>,
    ) -> RelationalResult<EntityRecord> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        let fields_json = serde_json::to_string(fields)?;
        let created_at = chrono::Utc::now().timestamp_millis();
        let staged = inner.conn.execute(
            "INSERT INTO records (entity_type, remote_key, fields, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![entity_type, remote_key.as_str(), fields_json, created_at],
        );
        if let Err(e) = staged {
            rollback(&mut inner);
            return Err(e.into());
        }
        let id = inner.conn.last_insert_rowid();
        debug!("staged record {} of type {}", id, entity_type);
        Ok(EntityRecord {
            id: RecordId::new(id),
            entity_type: entity_type.to_string(),
            remote_key: remote_key.clone(),
            fields: fields.clone(),
            created_at,
        })
    }

    fn find_match(
        &self,
        entity_type: &str,
        filter: &[(String, Value)],
    ) -> RelationalResult<Option<EntityRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut stmt = inner.conn.prepare(
            "SELECT id, entity_type, remote_key, fields, created_at
             FROM records WHERE entity_type = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![entity_type], |row| {
            let id: i64 = row.get(0)?;
            let etype: String = row.get(1)?;
            let key: String = row.get(2)?;
            let fields_json: String = row.get(3)?;
            let created_at: i64 = row.get(4)?;
            Ok((id, etype, key, fields_json, created_at))
        })?;

        for row in rows {
            let (id, etype, key, fields_json, created_at) = row?;
            let record = row_to_record(id, etype, key, fields_json, created_at)?;
            let matches = filter
                .iter()
                .all(|(name, value)| record.fields.get(name) == Some(value));
            if matches {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn delete(&self, id: RecordId) -> RelationalResult<()> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        let staged = inner.conn.execute(
            "DELETE FROM records WHERE id = ?1",
            params![id.as_i64()],
        );
        match staged {
            Ok(0) => {
                rollback(&mut inner);
                Err(RelationalError::NotFound(id.to_string()))
            }
            Ok(_) => Ok(()),
            Err(e) => {
                rollback(&mut inner);
                Err(e.into())
            }
        }
    }

    fn commit(&self) -> RelationalResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.in_tx {
            inner.conn.execute_batch("COMMIT")?;
            inner.in_tx = false;
        }
        Ok(())
    }
}
