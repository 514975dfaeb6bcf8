//! Integration tests for API endpoints.
//!
//! Requests run through the full router (CORS, cookies, session gate)
//! against an in-memory account store.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{send, send_form, test_app};

// =============================================================================
// Root and health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let (app, _) = test_app();
    let res = send(&app, "GET", "/", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!("Home page"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app();
    let res = send(&app, "GET", "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "healthy");
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_sets_cookie_and_returns_token() {
    let (app, store) = test_app();
    let res = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"})),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Ann");
    assert_eq!(res.body["email"], "ann@x.com");
    assert_eq!(res.body["role"], "customer");
    assert!(res.body["_id"].is_string());
    assert!(res.body.get("password").is_none());
    assert!(res.body.get("password_hash").is_none());

    let token = res.body["token"].as_str().unwrap().to_string();
    assert_eq!(res.cookie_token(), Some(token));
    let cookie = res.set_cookie.unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Expires="));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let (app, _) = test_app();
    let res = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({"name": "Ann", "email": "  Ann@X.com ", "password": "secret1"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["email"], "ann@x.com");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, store) = test_app();
    let body = json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"});
    send(&app, "POST", "/api/users/register", None, Some(body.clone())).await;

    let res = send(&app, "POST", "/api/users/register", None, Some(body)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "email has already been registered");
    assert!(res.set_cookie.is_none());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, store) = test_app();
    let cases = [
        (json!({"email": "ann@x.com", "password": "secret1"}), "Please fill in all required fields"),
        (json!({"name": "Ann", "email": "ann@x.com", "password": "12345"}), "Password must be at least 6 characters"),
        (json!({"name": "Ann", "email": "not-an-email", "password": "secret1"}), "please enter a valid email"),
    ];

    for (body, message) in cases {
        let res = send(&app, "POST", "/api/users/register", None, Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["message"], message);
        assert!(res.set_cookie.is_none());
    }
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_register_and_login_accept_form_bodies() {
    let (app, store) = test_app();

    let res = send_form(
        &app,
        "/api/users/register",
        "name=Ann&email=ann%40x.com&password=secret1",
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["email"], "ann@x.com");
    assert!(res.cookie_token().is_some());
    assert_eq!(store.len(), 1);

    let res = send_form(&app, "/api/users/login", "email=ann%40x.com&password=secret1").await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Ann");

    let res = send_form(&app, "/api/users/login", "email=ann%40x.com").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Please add email and password");
}

// =============================================================================
// Login, status and logout
// =============================================================================

async fn register_ann(app: &axum::Router) -> String {
    let res = send(
        app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"})),
    )
    .await;
    res.body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_success() {
    let (app, _) = test_app();
    register_ann(&app).await;

    let res = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "ANN@x.com", "password": "secret1"})),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["email"], "ann@x.com");
    assert_eq!(res.body["role"], "customer");
    assert_eq!(res.body["phone"], "+84");
    assert!(res.body.get("token").is_none());
    assert!(res.cookie_token().is_some());
}

#[tokio::test]
async fn test_login_failures() {
    let (app, _) = test_app();
    register_ann(&app).await;

    let wrong = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "ann@x.com", "password": "wrong12"})),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.body["message"], "Invalid email or password");
    assert!(wrong.set_cookie.is_none());

    let unknown = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({"email": "bob@x.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body["message"], "User does not exist.");

    let missing = send(&app, "POST", "/api/users/login", None, Some(json!({"email": "ann@x.com"}))).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "Please add email and password");
}

#[tokio::test]
async fn test_loggedin_status() {
    let (app, _) = test_app();
    let token = register_ann(&app).await;

    let res = send(&app, "GET", "/api/users/loggedin", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(true));

    let res = send(&app, "GET", "/api/users/loggedin", None, None).await;
    assert_eq!(res.body, json!(false));

    let tampered = format!("{}x", token);
    let res = send(&app, "GET", "/api/users/loggedin", Some(&tampered), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(false));
}

#[tokio::test]
async fn test_logout_clears_cookie_without_revoking_token() {
    let (app, _) = test_app();
    let token = register_ann(&app).await;

    let res = send(&app, "GET", "/api/users/logout", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Successfully logged out");
    let cookie = res.set_cookie.unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("1970"));

    // Tokens are stateless; a retained copy stays valid until it expires
    let res = send(&app, "GET", "/api/users/loggedin", Some(&token), None).await;
    assert_eq!(res.body, json!(true));
}

#[tokio::test]
async fn test_logout_without_session() {
    let (app, _) = test_app();
    let res = send(&app, "GET", "/api/users/logout", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.set_cookie.is_some());
}

// =============================================================================
// Protected profile routes
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_session() {
    let (app, _) = test_app();
    for (method, uri) in [
        ("GET", "/api/users/getuser"),
        ("PATCH", "/api/users/updateuser"),
        ("PATCH", "/api/users/updatephoto"),
    ] {
        let res = send(&app, method, uri, None, Some(json!({}))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(res.body["message"], "Not authorized, please login");

        let res = send(&app, method, uri, Some("garbage"), Some(json!({}))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_getuser_returns_profile() {
    let (app, _) = test_app();
    let token = register_ann(&app).await;

    let res = send(&app, "GET", "/api/users/getuser", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Ann");
    assert_eq!(res.body["email"], "ann@x.com");
    assert!(res.body["photo"].as_str().unwrap().starts_with("https://"));
    assert!(res.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_updateuser_patches_fields() {
    let (app, _) = test_app();
    let token = register_ann(&app).await;

    let res = send(
        &app,
        "PATCH",
        "/api/users/updateuser",
        Some(&token),
        Some(json!({"name": "Ann Lee", "address": {"city": "Hanoi"}})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Ann Lee");
    assert_eq!(res.body["phone"], "+84");
    assert_eq!(res.body["address"]["city"], "Hanoi");

    // Empty patch leaves the profile untouched
    let res = send(&app, "PATCH", "/api/users/updateuser", Some(&token), Some(json!({}))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Ann Lee");
    assert_eq!(res.body["email"], "ann@x.com");
    assert_eq!(res.body["address"]["city"], "Hanoi");
}

#[tokio::test]
async fn test_updatephoto() {
    let (app, _) = test_app();
    let token = register_ann(&app).await;

    let res = send(
        &app,
        "PATCH",
        "/api/users/updatephoto",
        Some(&token),
        Some(json!({"photo": "https://cdn.example.com/ann.png"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["photo"], "https://cdn.example.com/ann.png");

    let res = send(&app, "GET", "/api/users/getuser", Some(&token), None).await;
    assert_eq!(res.body["photo"], "https://cdn.example.com/ann.png");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();
    let res = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["paths"]["/api/users/register"].is_object());
}
