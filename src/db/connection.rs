use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use tracing::{debug, info};

use crate::db::{districts, prices};
use crate::errors::ServerError;

// Thread-local connection slot, remembers which file it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    /// Each worker thread keeps its own connection; it is reopened when the
    /// thread is handed a `Database` for a different file.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();

                let stale = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if stale {
                    debug!(path = %self.path, "opening sqlite connection");
                    *slot = Some((self.path.clone(), open_connection(&self.path)?));
                }

                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn =
        Connection::open(path).map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;

    Ok(conn)
}

/// Applies the schema and seeds default prices and districts. Idempotent.
pub fn apply_schema(conn: &mut Connection, schema_sql: &str) -> Result<(), ServerError> {
    conn.execute_batch(schema_sql)
        .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;

    prices::seed_defaults(conn)?;
    districts::seed_defaults(conn)?;
    Ok(())
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| apply_schema(conn, &schema_sql))?;

    info!(schema = schema_path, db = db.path(), "database initialized");
    Ok(())
}

/// In-memory connection with the production schema applied.
#[cfg(test)]
pub fn test_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    apply_schema(&mut conn, include_str!("../../sql/schema.sql")).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_can_be_applied_twice() {
        let mut conn = test_conn();
        apply_schema(&mut conn, include_str!("../../sql/schema.sql")).unwrap();

        let districts: i64 = conn
            .query_row("select count(*) from districts", [], |r| r.get(0))
            .unwrap();
        assert_eq!(districts, crate::domain::districts::DEFAULT_DISTRICTS.len() as i64);
    }

    #[test]
    fn with_conn_reopens_for_other_database() {
        let dir = tempfile::tempdir().unwrap();
        let a = Database::new(dir.path().join("a.sqlite3").to_string_lossy().to_string());
        let b = Database::new(dir.path().join("b.sqlite3").to_string_lossy().to_string());

        a.with_conn(|conn| {
            conn.execute_batch("create table only_in_a (id integer);")
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();

        let found: i64 = b
            .with_conn(|conn| {
                conn.query_row(
                    "select count(*) from sqlite_master where name = 'only_in_a'",
                    [],
                    |r| r.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(found, 0);
    }
}
