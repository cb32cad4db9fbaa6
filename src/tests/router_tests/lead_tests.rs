// src/tests/router_tests/lead_tests.rs
use crate::db::requests::list_requests;
use crate::router::handle;
use crate::tests::utils::{body_string, init_test_app, post_form};

const LEAD_FORM: &str = "property_type=house&cleaning_type=deep&area=100&bathrooms=2&windows=on\
    &addons=fridge&addons=oven&dirt_level=heavy\
    &name=Aigerim&phone=8+(777)+123-45-67&contact_channel=whatsapp&district=medeu&comment=3rd+floor";

#[test]
fn lead_is_stored_and_notified() {
    let app = init_test_app();

    let resp = handle(post_form("/leads", LEAD_FORM, None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("принята"));

    let rows = app
        .db()
        .with_conn(|conn| list_requests(conn, 10))
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.phone, "77771234567");
    assert_eq!(row.contact_channel, "whatsapp");
    assert_eq!(row.cleaning_type, "deep");
    assert_eq!(row.district.as_deref(), Some("Медеуский"));
    assert_eq!(row.district_surcharge, 1000);
    assert_eq!(row.comment.as_deref(), Some("3rd floor"));
    assert_eq!(row.status, "new");
    // (100*460*1.2 + 2*2500 + 2000 + 3500 + 3000) * 1.4 = 96180
    assert_eq!(row.price_min, 96000);
    assert_eq!(row.price_max, 125000);

    let sent = app.notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].lead_id, row.id);
}

#[test]
fn invalid_phone_returns_form_error() {
    let app = init_test_app();

    let form = "cleaning_type=regular&area=50&name=Aigerim&phone=12345";
    let resp = handle(post_form("/leads", form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("номер телефона"));
    assert!(body.contains("href=\"/#calculator\""));

    assert_eq!(app.count("select count(*) from requests"), 0);
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}

#[test]
fn unknown_cleaning_type_is_a_form_error() {
    let app = init_test_app();

    let form = "cleaning_type=laundry&area=50&name=Aigerim&phone=87771234567";
    let resp = handle(post_form("/leads", form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(app.count("select count(*) from requests"), 0);
}

#[test]
fn zero_area_is_rejected() {
    let app = init_test_app();

    let form = "cleaning_type=regular&area=0&name=Aigerim&phone=87771234567";
    let resp = handle(post_form("/leads", form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(app.count("select count(*) from requests"), 0);
}
