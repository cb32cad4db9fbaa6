// src/state.rs
use crate::auth::AdminCredentials;
use crate::db::connection::Database;
use crate::db::prices::PriceTableCache;
use crate::leads::LeadSubmissionService;

/// Shared by every worker for the lifetime of the server.
pub struct AppState {
    pub db: Database,
    pub prices: PriceTableCache,
    pub submissions: LeadSubmissionService,
    pub admin: AdminCredentials,
}

impl AppState {
    pub fn new(db: Database, submissions: LeadSubmissionService, admin: AdminCredentials) -> Self {
        Self {
            db,
            prices: PriceTableCache::new(),
            submissions,
            admin,
        }
    }
}
