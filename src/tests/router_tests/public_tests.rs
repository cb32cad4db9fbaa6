// src/tests/router_tests/public_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, init_test_app, post_form};

#[test]
fn home_page_renders_calculator_with_default_quote() {
    let app = init_test_app();

    let resp = handle(get("/", None), &app.state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("id=\"calculator\""));
    assert!(body.contains("hx-post=\"/quote\""));
    // 50 m² regular apartment, one bathroom.
    assert!(body.contains("14 000"));
    assert!(body.contains("18 000"));
    assert!(body.contains("Медеуский"));
    assert!(body.contains("Айгерим"));
}

#[test]
fn health_check() {
    let app = init_test_app();
    let resp = handle(get("/health", None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "ok");
}

#[test]
fn quote_partial_prices_the_configuration() {
    let app = init_test_app();

    let req = post_form(
        "/quote",
        "property_type=apartment&cleaning_type=regular&area=50&bathrooms=1&windows=on&dirt_level=normal",
        None,
    );
    let resp = handle(req, &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("16 000"), "{body}");
    assert!(body.contains("21 000"), "{body}");
    assert!(!body.contains("<html"));
}

#[test]
fn quote_partial_shows_district_surcharge() {
    let app = init_test_app();

    let req = post_form(
        "/quote",
        "cleaning_type=regular&area=50&bathrooms=1&district=medeu",
        None,
    );
    let body = body_string(handle(req, &app.state).unwrap());
    assert!(body.contains("+ 1 000 ₸"), "{body}");
}

#[test]
fn quote_partial_rejects_unknown_cleaning_type() {
    let app = init_test_app();

    let req = post_form("/quote", "cleaning_type=laundry&area=50", None);
    let resp = handle(req, &app.state).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("quote-error"));
}

#[test]
fn service_landing_prefills_cleaning_type() {
    let app = init_test_app();

    let resp = handle(get("/services/post-renovation", None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Уборка после ремонта в Алматы"));
    assert!(body.contains("value=\"post_renovation\" checked"));
}

#[test]
fn district_landing_mentions_surcharge() {
    let app = init_test_app();

    let resp = handle(get("/districts/turksib", None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Турксибский"));
    assert!(body.contains("1 500"));
}

#[test]
fn unknown_landing_pages_are_not_found() {
    let app = init_test_app();

    assert!(matches!(
        handle(get("/services/laundry", None), &app.state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/districts/atlantis", None), &app.state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/nope", None), &app.state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn submitted_review_waits_for_moderation() {
    let app = init_test_app();
    let before = app.count("select count(*) from reviews where approved = 1");

    let req = post_form("/reviews", "author=Oleg&body=Great+job&rating=5", None);
    let resp = handle(req, &app.state).unwrap();
    assert_eq!(resp.status(), 302);

    assert_eq!(app.count("select count(*) from reviews where approved = 0"), 1);
    assert_eq!(
        app.count("select count(*) from reviews where approved = 1"),
        before
    );
}

#[test]
fn review_with_bad_rating_is_rejected() {
    let app = init_test_app();

    let req = post_form("/reviews", "author=Oleg&body=Meh&rating=9", None);
    assert!(matches!(
        handle(req, &app.state),
        Err(ServerError::BadRequest(_))
    ));
}
