// src/db/districts.rs
use crate::domain::districts::{default_districts, is_valid_slug, District};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

fn row_to_district(row: &rusqlite::Row<'_>) -> rusqlite::Result<District> {
    Ok(District {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        surcharge: row.get(3)?,
    })
}

pub fn seed_defaults(conn: &Connection) -> Result<(), ServerError> {
    // Only seed an empty table so admin deletions stick across restarts.
    let count: i64 = conn
        .query_row("select count(*) from districts", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count districts failed: {e}")))?;
    if count > 0 {
        return Ok(());
    }

    for d in default_districts() {
        conn.execute(
            "insert or ignore into districts (name, slug, surcharge) values (?, ?, ?)",
            params![d.name, d.slug, d.surcharge],
        )
        .map_err(|e| ServerError::DbError(format!("seed district failed: {e}")))?;
    }
    Ok(())
}

pub fn list_districts(conn: &Connection) -> Result<Vec<District>, ServerError> {
    let mut stmt = conn
        .prepare("select id, name, slug, surcharge from districts order by id")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_district)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn find_by_slug(conn: &Connection, slug: &str) -> Result<Option<District>, ServerError> {
    conn.query_row(
        "select id, name, slug, surcharge from districts where slug = ?",
        params![slug],
        row_to_district,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select district failed: {e}")))
}

pub fn create_district(
    conn: &Connection,
    name: &str,
    slug: &str,
    surcharge: i64,
) -> Result<i64, ServerError> {
    let name = name.trim();
    let slug = slug.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("district name is required".into()));
    }
    if !is_valid_slug(slug) {
        return Err(ServerError::BadRequest(format!("invalid slug '{slug}'")));
    }
    if surcharge < 0 {
        return Err(ServerError::BadRequest("surcharge must not be negative".into()));
    }

    conn.execute(
        "insert into districts (name, slug, surcharge) values (?, ?, ?)",
        params![name, slug, surcharge],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => {
            ServerError::BadRequest(format!("district '{name}' or slug '{slug}' already exists"))
        }
        _ => ServerError::DbError(format!("insert district failed: {e}")),
    })?;

    Ok(conn.last_insert_rowid())
}

pub fn update_surcharge(conn: &Connection, id: i64, surcharge: i64) -> Result<(), ServerError> {
    if surcharge < 0 {
        return Err(ServerError::BadRequest("surcharge must not be negative".into()));
    }
    let updated = conn
        .execute(
            "update districts set surcharge = ? where id = ?",
            params![surcharge, id],
        )
        .map_err(|e| ServerError::DbError(format!("update district failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_district(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from districts where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete district failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
