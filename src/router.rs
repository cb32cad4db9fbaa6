// src/router.rs
use crate::auth::sessions::{
    clear_session_cookie, create_session, load_session, revoke_session, session_cookie,
    token_from_cookie_header,
};
use crate::auth::AdminSession;
use crate::db::{districts, executors, prices, requests, reviews};
use crate::domain::districts::district_surcharge;
use crate::domain::lead::RequestStatus;
use crate::domain::{compute_quote, CleaningType, ServiceConfiguration};
use crate::errors::ServerError;
use crate::forms::{price_table_from_form, read_form, service_config_from_form};
use crate::leads::{LeadForm, SubmissionError};
use crate::responses::{
    html_response, html_response_with_status, redirect, redirect_with_cookie, text_response,
    ResultResp,
};
use crate::spreadsheets::export_requests_xlsx;
use crate::state::AppState;
use crate::templates::components::{quote_error, quote_result, CalculatorPrefill};
use crate::templates::pages::{
    admin_page, district_page, home_page, lead_error_page, lead_success_page, login_page,
    service_page, AdminVm, HomeVm,
};
use astra::Request;
use maud::Markup;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

const PUBLIC_REVIEWS: i64 = 6;
const ADMIN_REQUESTS: i64 = 200;

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => public_page(state, CalculatorPrefill::default(), home_page),
        ("GET", ["health"]) => text_response("ok"),
        ("POST", ["quote"]) => quote_partial(&mut req, state),
        ("GET", ["services", slug]) => service_landing(state, slug),
        ("GET", ["districts", slug]) => district_landing(state, slug),
        ("POST", ["leads"]) => submit_lead(&mut req, state),
        ("POST", ["reviews"]) => submit_review(&mut req, state),

        ("GET", ["login"]) => match current_session(&req, state)? {
            Some(_) => redirect("/admin"),
            None => html_response(login_page(None)),
        },
        ("POST", ["login"]) => login(&mut req, state),
        ("POST", ["logout"]) => logout(&req, state),

        (_, ["admin", rest @ ..]) => {
            let Some(session) = current_session(&req, state)? else {
                return redirect("/login");
            };
            admin_route(&method, rest, &mut req, state, &session)
        }

        _ => Err(ServerError::NotFound),
    }
}

// ---------- public ----------

fn public_page<F>(state: &AppState, prefill: CalculatorPrefill, render: F) -> ResultResp
where
    F: FnOnce(&HomeVm<'_>) -> Markup,
{
    let prices = state.prices.get(&state.db)?;
    let (district_list, review_list) = state.db.with_conn(|conn| {
        Ok((
            districts::list_districts(conn)?,
            reviews::list_approved(conn, PUBLIC_REVIEWS)?,
        ))
    })?;

    let initial_quote = compute_quote(&prefill.service, &prices).ok();
    let vm = HomeVm {
        prefill,
        prices: &prices,
        districts: &district_list,
        reviews: &review_list,
        initial_quote,
    };
    html_response(render(&vm))
}

fn service_landing(state: &AppState, slug: &str) -> ResultResp {
    let cleaning_type = CleaningType::parse(slug).ok_or(ServerError::NotFound)?;
    let prefill = CalculatorPrefill {
        service: ServiceConfiguration {
            cleaning_type,
            ..ServiceConfiguration::default()
        },
        district: None,
    };
    public_page(state, prefill, |vm| service_page(cleaning_type, vm))
}

fn district_landing(state: &AppState, slug: &str) -> ResultResp {
    let district = state
        .db
        .with_conn(|conn| districts::find_by_slug(conn, slug))?
        .ok_or(ServerError::NotFound)?;

    let prefill = CalculatorPrefill {
        service: ServiceConfiguration::default(),
        district: Some(district.slug.clone()),
    };
    public_page(state, prefill, |vm| district_page(&district, vm))
}

/// htmx partial for `#quote-result`.
fn quote_partial(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let service = match service_config_from_form(&form) {
        Ok(service) => service,
        Err(ServerError::BadRequest(msg)) => {
            return html_response_with_status(400, quote_error(&msg));
        }
        Err(e) => return Err(e),
    };

    let prices = state.prices.get(&state.db)?;
    let surcharge = match form.get("district").map(str::trim).filter(|d| !d.is_empty()) {
        Some(key) => {
            let list = state.db.with_conn(|conn| districts::list_districts(conn))?;
            district_surcharge(&list, key)
        }
        None => None,
    };

    match compute_quote(&service, &prices) {
        Ok(quote) => html_response(quote_result(&quote, surcharge)),
        Err(e) => {
            warn!(error = %e, "quote rejected");
            html_response_with_status(400, quote_error(&e.to_string()))
        }
    }
}

fn rejection_message(err: &SubmissionError) -> String {
    match err {
        SubmissionError::InvalidPhone => {
            "Проверьте номер телефона: нужен мобильный номер в формате +7 7XX XXX-XX-XX".to_string()
        }
        other => other.to_string(),
    }
}

fn submit_lead(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;

    let lead_form = match LeadForm::from_form(&form) {
        Ok(f) => f,
        Err(e) => return html_response_with_status(400, lead_error_page(&rejection_message(&e))),
    };

    let prices = state.prices.get(&state.db)?;
    match state
        .submissions
        .submit(&state.db, lead_form, &prices, now_unix())
    {
        Ok(lead) => html_response(lead_success_page(&lead)),
        Err(SubmissionError::SubmissionFailed(msg)) => {
            error!(error = %msg, "lead could not be stored");
            Err(ServerError::InternalError)
        }
        Err(e) => {
            info!(error = %e, "lead rejected");
            html_response_with_status(400, lead_error_page(&rejection_message(&e)))
        }
    }
}

fn submit_review(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let rating = form.parse_i64("rating")?;
    let author = form.get("author").unwrap_or_default();
    let body = form.get("body").unwrap_or_default();

    let id = state
        .db
        .with_conn(|conn| reviews::submit_review(conn, author, body, rating, now_unix()))?;

    info!(review_id = id, "review submitted for moderation");
    redirect("/#reviews")
}

// ---------- auth ----------

fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
        .map(str::to_string)
}

fn current_session(req: &Request, state: &AppState) -> Result<Option<AdminSession>, ServerError> {
    match session_token(req) {
        Some(token) => state
            .db
            .with_conn(|conn| load_session(conn, &token, now_unix())),
        None => Ok(None),
    }
}

fn login(req: &mut Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let login = form.get("login").unwrap_or_default().trim();
    let password = form.get("password").unwrap_or_default();

    if !state.admin.verify(login, password) {
        warn!(login, "admin login failed");
        return html_response_with_status(401, login_page(Some("Неверный логин или пароль")));
    }

    let token = state
        .db
        .with_conn(|conn| create_session(conn, login, now_unix()))?;

    info!(login, "admin logged in");
    redirect_with_cookie("/admin", &session_cookie(&token))
}

fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = session_token(req) {
        state
            .db
            .with_conn(|conn| revoke_session(conn, &token, now_unix()))?;
    }
    redirect_with_cookie("/login", &clear_session_cookie())
}

// ---------- admin ----------

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

fn admin_route(
    method: &str,
    segments: &[&str],
    req: &mut Request,
    state: &AppState,
    session: &AdminSession,
) -> ResultResp {
    let now = now_unix();

    match (method, segments) {
        ("GET", []) => dashboard(state, session, now),
        ("GET", ["requests", "export"]) => {
            let rows = state
                .db
                .with_conn(|conn| requests::list_requests(conn, i64::MAX))?;
            info!(rows = rows.len(), login = %session.login, "requests exported");
            export_requests_xlsx(&rows, now)
        }

        ("POST", ["requests", id, "status"]) => {
            let id = parse_id(id)?;
            let form = read_form(req)?;
            let raw = form.required("status")?;
            let status = RequestStatus::parse(raw)
                .ok_or_else(|| ServerError::BadRequest(format!("unknown status '{raw}'")))?;
            state
                .db
                .with_conn(|conn| requests::update_status(conn, id, status, now))?;
            info!(request_id = id, status = status.as_str(), "request status updated");
            redirect("/admin#requests")
        }
        ("POST", ["requests", id, "assign"]) => {
            let id = parse_id(id)?;
            let form = read_form(req)?;
            let executor_id = match form.get("executor_id").map(str::trim) {
                None | Some("") => None,
                Some(_) => Some(form.parse_i64("executor_id")?),
            };
            state
                .db
                .with_conn(|conn| requests::assign_executor(conn, id, executor_id, now))?;
            info!(request_id = id, ?executor_id, "request assignment changed");
            redirect("/admin#requests")
        }

        ("POST", ["executors"]) => {
            let form = read_form(req)?;
            let name = form.required("name")?;
            let phone = form.required("phone")?;
            let id = state
                .db
                .with_conn(|conn| executors::create_executor(conn, name, phone, now))?;
            info!(executor_id = id, "executor created");
            redirect("/admin#executors")
        }
        ("POST", ["executors", id, "toggle"]) => {
            let id = parse_id(id)?;
            state
                .db
                .with_conn(|conn| executors::toggle_active(conn, id))?;
            redirect("/admin#executors")
        }
        ("POST", ["executors", id, "delete"]) => {
            let id = parse_id(id)?;
            state
                .db
                .with_conn(|conn| executors::delete_executor(conn, id))?;
            info!(executor_id = id, "executor deleted");
            redirect("/admin#executors")
        }

        ("POST", ["districts"]) => {
            let form = read_form(req)?;
            let name = form.required("name")?;
            let slug = form.required("slug")?;
            let surcharge = match form.get("surcharge").map(str::trim) {
                None | Some("") => 0,
                Some(_) => form.parse_i64("surcharge")?,
            };
            let id = state
                .db
                .with_conn(|conn| districts::create_district(conn, name, slug, surcharge))?;
            info!(district_id = id, slug, "district created");
            redirect("/admin#districts")
        }
        ("POST", ["districts", id, "surcharge"]) => {
            let id = parse_id(id)?;
            let form = read_form(req)?;
            let surcharge = form.parse_i64("surcharge")?;
            state
                .db
                .with_conn(|conn| districts::update_surcharge(conn, id, surcharge))?;
            info!(district_id = id, surcharge, "district surcharge updated");
            redirect("/admin#districts")
        }
        ("POST", ["districts", id, "delete"]) => {
            let id = parse_id(id)?;
            state
                .db
                .with_conn(|conn| districts::delete_district(conn, id))?;
            redirect("/admin#districts")
        }

        ("POST", ["prices"]) => {
            let form = read_form(req)?;
            let table = price_table_from_form(&form)?;
            state
                .db
                .with_conn(|conn| prices::save_price_table(conn, &table, now))?;
            state.prices.invalidate();
            info!(login = %session.login, "price table updated");
            redirect("/admin#prices")
        }

        ("POST", ["reviews", id, "approve"]) => {
            let id = parse_id(id)?;
            state
                .db
                .with_conn(|conn| reviews::approve_review(conn, id))?;
            redirect("/admin#reviews")
        }
        ("POST", ["reviews", id, "delete"]) => {
            let id = parse_id(id)?;
            state
                .db
                .with_conn(|conn| reviews::delete_review(conn, id))?;
            redirect("/admin#reviews")
        }

        _ => Err(ServerError::NotFound),
    }
}

fn dashboard(state: &AppState, session: &AdminSession, now: i64) -> ResultResp {
    let prices = state.prices.get(&state.db)?;

    let vm = state.db.with_conn(|conn| {
        Ok(AdminVm {
            login: session.login.clone(),
            requests: requests::list_requests(conn, ADMIN_REQUESTS)?,
            executors: executors::list_executors(conn)?,
            districts: districts::list_districts(conn)?,
            prices,
            reviews: reviews::list_all(conn)?,
            month_count: requests::count_this_month(conn, now)?,
            new_count: requests::count_by_status(conn, RequestStatus::New)?,
        })
    })?;

    html_response(admin_page(&vm))
}
