// src/db/reviews.rs
use crate::domain::lead::{sanitize_text, COMMENT_MAX_CHARS, NAME_MAX_CHARS};
use crate::errors::ServerError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub rating: i64,
    pub approved: bool,
    pub created_at: i64,
}

fn query_reviews(conn: &Connection, sql: &str) -> Result<Vec<Review>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Review {
                id: row.get(0)?,
                author: row.get(1)?,
                body: row.get(2)?,
                rating: row.get(3)?,
                approved: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Testimonials shown on the public site.
pub fn list_approved(conn: &Connection, limit: i64) -> Result<Vec<Review>, ServerError> {
    let sql = format!(
        "select id, author, body, rating, approved, created_at from reviews
         where approved = 1 order by created_at desc limit {}",
        limit.max(0)
    );
    query_reviews(conn, &sql)
}

/// Everything, pending moderation first.
pub fn list_all(conn: &Connection) -> Result<Vec<Review>, ServerError> {
    query_reviews(
        conn,
        "select id, author, body, rating, approved, created_at from reviews
         order by approved asc, created_at desc",
    )
}

/// Public submission. Stored unapproved.
pub fn submit_review(
    conn: &Connection,
    author: &str,
    body: &str,
    rating: i64,
    now: i64,
) -> Result<i64, ServerError> {
    let author = sanitize_text(author, NAME_MAX_CHARS);
    let body = sanitize_text(body, COMMENT_MAX_CHARS);
    if author.is_empty() || body.is_empty() {
        return Err(ServerError::BadRequest("name and review text are required".into()));
    }
    if !(1..=5).contains(&rating) {
        return Err(ServerError::BadRequest("rating must be between 1 and 5".into()));
    }

    conn.execute(
        "insert into reviews (author, body, rating, approved, created_at) values (?, ?, ?, 0, ?)",
        params![author, body, rating, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert review failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn approve_review(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let updated = conn
        .execute("update reviews set approved = 1 where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("approve review failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_review(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from reviews where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete review failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
