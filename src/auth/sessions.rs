// src/auth/sessions.rs
use crate::auth::credentials::sha256;
use crate::errors::ServerError;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use rusqlite::{params, Connection, OptionalExtension};

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub id: i64,
    pub login: String,
    pub expires_at: i64,
}

/// 32 random bytes, URL-safe base64 without padding (~43 chars).
fn new_token() -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

/// Stores only the token hash and returns the raw token for the cookie.
pub fn create_session(conn: &Connection, login: &str, now: i64) -> Result<String, ServerError> {
    let raw_token = new_token();
    let hash = sha256(&raw_token);

    conn.execute(
        r#"
        insert into admin_sessions (login, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![login, hash.as_slice(), now, now + SESSION_TTL_SECS],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<AdminSession>, ServerError> {
    let hash = sha256(raw_token);

    conn.query_row(
        r#"
        select id, login, expires_at
        from admin_sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(AdminSession {
                id: row.get(0)?,
                login: row.get(1)?,
                expires_at: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = sha256(raw_token);
    conn.execute(
        "update admin_sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Extracts the session token from a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
