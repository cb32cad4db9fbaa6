// src/tests/router_tests/auth_flow_tests.rs
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, init_test_app, location, post_form, ADMIN_LOGIN, ADMIN_PASSWORD,
};

#[test]
fn admin_without_session_redirects_to_login() {
    let app = init_test_app();

    for req in [
        get("/admin", None),
        get("/admin/requests/export", None),
        post_form("/admin/prices", "base_rate.regular=1", None),
        get("/admin", Some("forged-token")),
    ] {
        let resp = handle(req, &app.state).unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(location(&resp), "/login");
    }
}

#[test]
fn login_sets_cookie_and_opens_dashboard() {
    let app = init_test_app();

    let form = format!("login={ADMIN_LOGIN}&password={ADMIN_PASSWORD}");
    let resp = handle(post_form("/login", &form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin");

    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let token = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap_or("")
        .to_string();

    let resp = handle(get("/admin", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Панель управления"));
}

#[test]
fn wrong_password_is_rejected() {
    let app = init_test_app();

    let form = format!("login={ADMIN_LOGIN}&password=guess");
    let resp = handle(post_form("/login", &form, None), &app.state).unwrap();
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert_eq!(app.count("select count(*) from admin_sessions"), 0);
}

#[test]
fn logout_revokes_session() {
    let app = init_test_app();
    let token = app.admin_token();

    let resp = handle(post_form("/logout", "", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    let resp = handle(get("/admin", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn login_page_redirects_when_signed_in() {
    let app = init_test_app();
    let token = app.admin_token();

    let resp = handle(get("/login", Some(&token)), &app.state).unwrap();
    assert_eq!(location(&resp), "/admin");

    let resp = handle(get("/login", None), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
}
