// src/tests/utils.rs
use crate::auth::{sessions, AdminCredentials};
use crate::db::connection::{init_db, Database};
use crate::errors::ServerError;
use crate::leads::LeadSubmissionService;
use crate::notify::{LeadNotification, Notifier, NotifyError};
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

pub const ADMIN_LOGIN: &str = "manager";
pub const ADMIN_PASSWORD: &str = "s3cret";

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<LeadNotification>>>,
}

impl Notifier for RecordingNotifier {
    fn notify_lead(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

/// App state over a fresh database file that lives as long as `_dir`.
pub struct TestApp {
    _dir: tempfile::TempDir,
    pub state: AppState,
    pub notifier: RecordingNotifier,
}

impl TestApp {
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Opens an admin session directly and returns its raw token.
    pub fn admin_token(&self) -> String {
        self.db()
            .with_conn(|conn| sessions::create_session(conn, ADMIN_LOGIN, now_unix()))
            .expect("Failed to create session")
    }

    pub fn count(&self, sql: &str) -> i64 {
        self.db()
            .with_conn(|conn| {
                conn.query_row(sql, [], |r| r.get(0))
                    .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .expect("count query failed")
    }
}

pub fn init_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::new(dir.path().join("test.sqlite3").to_string_lossy().to_string());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let notifier = RecordingNotifier::default();
    let state = AppState::new(
        db,
        LeadSubmissionService::new(Box::new(notifier.clone())),
        AdminCredentials::new(ADMIN_LOGIN, ADMIN_PASSWORD),
    );

    TestApp {
        _dir: dir,
        state,
        notifier,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(token) = cookie {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
