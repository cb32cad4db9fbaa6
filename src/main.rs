use crate::auth::AdminCredentials;
use crate::db::connection::{init_db, Database};
use crate::leads::LeadSubmissionService;
use crate::notify::{LogNotifier, Notifier, TelegramNotifier};
use crate::responses::html_error_response;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod leads;
mod notify;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn build_notifier(cfg: &config::TelegramConfig) -> Box<dyn Notifier> {
    if !cfg.is_enabled() {
        warn!("telegram is not configured, new leads will only be logged");
        return Box::new(LogNotifier);
    }

    match TelegramNotifier::new(cfg) {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            error!(error = %e, "telegram client setup failed, falling back to log notifier");
            Box::new(LogNotifier)
        }
    }
}

fn main() {
    init_tracing();

    let cfg = match config::load_config("cleaning") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let db = Database::new(cfg.database.path.clone());
    if let Err(e) = init_db(&db, &cfg.database.schema_path) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let addr: SocketAddr = match cfg.server.addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(addr = %cfg.server.addr, error = %e, "invalid listen address");
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        db,
        LeadSubmissionService::new(build_notifier(&cfg.telegram)),
        AdminCredentials::new(&cfg.admin.login, &cfg.admin.password),
    );

    info!(
        %addr,
        workers = cfg.server.workers,
        admin = state.admin.login(),
        "starting server"
    );

    let server = Server::bind(&addr).max_workers(cfg.server.workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
