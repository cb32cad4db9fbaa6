// src/db/executors.rs
use crate::domain::lead::{normalize_phone, sanitize_text, NAME_MAX_CHARS};
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// A cleaner that can be assigned to requests.
#[derive(Debug, Clone)]
pub struct Executor {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: i64,
}

pub fn list_executors(conn: &Connection) -> Result<Vec<Executor>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, name, phone, is_active, created_at from executors order by is_active desc, name",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Executor {
                id: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
                is_active: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Name is sanitized, phone must be a Kazakhstani mobile number.
pub fn create_executor(
    conn: &Connection,
    name: &str,
    phone: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let name = sanitize_text(name, NAME_MAX_CHARS);
    if name.is_empty() {
        return Err(ServerError::BadRequest("executor name is required".into()));
    }
    let phone = normalize_phone(phone)
        .ok_or_else(|| ServerError::BadRequest(format!("invalid phone number '{phone}'")))?;

    conn.execute(
        "insert into executors (name, phone, is_active, created_at) values (?, ?, 1, ?)",
        params![name, phone, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert executor failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn toggle_active(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update executors set is_active = 1 - is_active where id = ?",
            params![id],
        )
        .map_err(|e| ServerError::DbError(format!("toggle executor failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Requests assigned to the executor become unassigned (FK `on delete set null`).
pub fn delete_executor(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from executors where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete executor failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
