// src/tests/router_tests/admin_tests.rs
use crate::db::requests::get_request;
use crate::domain::CleaningType;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, init_test_app, location, post_form, TestApp};

const LEAD_FORM: &str =
    "cleaning_type=regular&area=50&bathrooms=1&name=Aigerim&phone=87771234567&district=auezov";

fn submit_lead(app: &TestApp) -> i64 {
    let resp = handle(post_form("/leads", LEAD_FORM, None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    app.count("select max(id) from requests")
}

#[test]
fn dashboard_lists_requests_and_counts() {
    let app = init_test_app();
    let token = app.admin_token();
    submit_lead(&app);

    let resp = handle(get("/admin", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Aigerim"));
    assert!(body.contains("+7 (777) 123-45-67"));
    assert!(body.contains("Ауэзовский"));
    assert!(body.contains("Заявок в этом месяце"));
    assert!(body.contains("/admin/requests/export"));
}

#[test]
fn dashboard_shows_service_details_and_timestamps() {
    let app = init_test_app();
    let token = app.admin_token();
    let form = format!("{LEAD_FORM}&windows=on&addons=fridge&dirt_level=heavy");
    let resp = handle(post_form("/leads", &form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    handle(
        post_form("/admin/executors", "name=Gulnara&phone=%2B77001112233", Some(&token)),
        &app.state,
    )
    .unwrap();
    app.db()
        .with_conn(|conn| {
            conn.execute("update requests set updated_at = created_at + 3600", [])
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();

    let body = body_string(handle(get("/admin", Some(&token)), &app.state).unwrap());
    assert!(body.contains("санузлов: 1, окна, Мойка холодильника внутри, загрязнение: Сильное"));
    assert!(body.contains("изм. "));
    // executor row carries its creation date
    assert!(body.contains("<small>с 20"));
}

#[test]
fn status_update_and_assignment() {
    let app = init_test_app();
    let token = app.admin_token();
    let id = submit_lead(&app);

    let resp = handle(
        post_form(&format!("/admin/requests/{id}/status"), "status=in_progress", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let resp = handle(
        post_form("/admin/executors", "name=Gulnara&phone=%2B77001112233", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    let executor_id = app.count("select max(id) from executors");

    handle(
        post_form(
            &format!("/admin/requests/{id}/assign"),
            &format!("executor_id={executor_id}"),
            Some(&token),
        ),
        &app.state,
    )
    .unwrap();

    let row = app
        .db()
        .with_conn(|conn| get_request(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "in_progress");
    assert_eq!(row.executor_name.as_deref(), Some("Gulnara"));

    handle(
        post_form(&format!("/admin/requests/{id}/assign"), "executor_id=", Some(&token)),
        &app.state,
    )
    .unwrap();
    let row = app
        .db()
        .with_conn(|conn| get_request(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(row.executor_id, None);
}

#[test]
fn unknown_status_is_bad_request() {
    let app = init_test_app();
    let token = app.admin_token();
    let id = submit_lead(&app);

    assert!(matches!(
        handle(
            post_form(&format!("/admin/requests/{id}/status"), "status=lost", Some(&token)),
            &app.state,
        ),
        Err(ServerError::BadRequest(_))
    ));
    assert!(matches!(
        handle(
            post_form("/admin/requests/999/status", "status=done", Some(&token)),
            &app.state,
        ),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn export_returns_xlsx_attachment() {
    let app = init_test_app();
    let token = app.admin_token();
    submit_lead(&app);

    let resp = handle(get("/admin/requests/export", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.contains("requests_"));
    assert!(disposition.contains(".xlsx"));

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.into_body().reader(), &mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn price_update_invalidates_cached_table() {
    let app = init_test_app();
    let token = app.admin_token();

    // Warm the cache.
    let before = app.state.prices.get(app.db()).unwrap();
    assert_eq!(before.base_rate(CleaningType::Regular), Some(230.0));

    let form = "base_rate.regular=300&base_rate.deep=460&base_rate.post_renovation=690&base_rate.eco=300\
        &bathroom.min=2500&bathroom.max=4000&window.min=2000&window.max=5000&heavy_dirt_modifier=1.4";
    let resp = handle(post_form("/admin/prices", form, Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin#prices");

    let after = app.state.prices.get(app.db()).unwrap();
    assert_eq!(after.base_rate(CleaningType::Regular), Some(300.0));

    // 50 * 300 + 2500 = 17500
    let body = body_string(
        handle(
            post_form("/quote", "cleaning_type=regular&area=50&bathrooms=1", None),
            &app.state,
        )
        .unwrap(),
    );
    assert!(body.contains("17 500"), "{body}");
}

#[test]
fn invalid_prices_are_rejected() {
    let app = init_test_app();
    let token = app.admin_token();

    let form = "base_rate.regular=300&base_rate.deep=460&base_rate.post_renovation=690&base_rate.eco=300\
        &bathroom.min=5000&bathroom.max=4000&window.min=2000&window.max=5000&heavy_dirt_modifier=1.4";
    assert!(matches!(
        handle(post_form("/admin/prices", form, Some(&token)), &app.state),
        Err(ServerError::BadRequest(_))
    ));
    assert_eq!(
        app.state
            .prices
            .get(app.db())
            .unwrap()
            .base_rate(CleaningType::Regular),
        Some(230.0)
    );
}

#[test]
fn district_management() {
    let app = init_test_app();
    let token = app.admin_token();

    let resp = handle(
        post_form(
            "/admin/districts",
            "name=Talgar&slug=talgar&surcharge=3000",
            Some(&token),
        ),
        &app.state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    let id = app.count("select id from districts where slug = 'talgar'");

    handle(
        post_form(&format!("/admin/districts/{id}/surcharge"), "surcharge=2500", Some(&token)),
        &app.state,
    )
    .unwrap();
    let body = body_string(handle(get("/districts/talgar", None), &app.state).unwrap());
    assert!(body.contains("2 500"));

    handle(
        post_form(&format!("/admin/districts/{id}/delete"), "", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert!(matches!(
        handle(get("/districts/talgar", None), &app.state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn executor_toggle_and_delete() {
    let app = init_test_app();
    let token = app.admin_token();

    handle(
        post_form("/admin/executors", "name=Gulnara&phone=87001112233", Some(&token)),
        &app.state,
    )
    .unwrap();
    let id = app.count("select max(id) from executors");

    handle(
        post_form(&format!("/admin/executors/{id}/toggle"), "", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(
        app.count(&format!("select is_active from executors where id = {id}")),
        0
    );

    handle(
        post_form(&format!("/admin/executors/{id}/delete"), "", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(app.count("select count(*) from executors"), 0);
}

#[test]
fn review_moderation() {
    let app = init_test_app();
    let token = app.admin_token();

    handle(
        post_form("/reviews", "author=Oleg&body=Spotless&rating=5", None),
        &app.state,
    )
    .unwrap();
    let id = app.count("select id from reviews where approved = 0");

    handle(
        post_form(&format!("/admin/reviews/{id}/approve"), "", Some(&token)),
        &app.state,
    )
    .unwrap();
    let body = body_string(handle(get("/", None), &app.state).unwrap());
    assert!(body.contains("Spotless"));

    handle(
        post_form(&format!("/admin/reviews/{id}/delete"), "", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(
        app.count(&format!("select count(*) from reviews where id = {id}")),
        0
    );
}
