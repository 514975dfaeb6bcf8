//! Shared helpers for integration tests.
//!
//! The router is exercised end-to-end against an in-memory account store,
//! so no database is required.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use user_accounts::api::{create_router, AppState};
use user_accounts::config::{Config, MSG_EMAIL_TAKEN, MSG_USER_NOT_FOUND};
use user_accounts::domain::{NewUser, User};
use user_accounts::errors::{AppError, AppResult};
use user_accounts::infra::UserRepository;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Account store backed by a map, enforcing email uniqueness like the real index.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            photo: new_user.photo,
            phone: new_user.phone,
            address: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(AppError::NotFound(MSG_USER_NOT_FOUND.to_string())),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config::new("postgres://unused", TEST_SECRET).unwrap()
}

/// Router wired to a fresh in-memory store; the store is returned for inspection.
pub fn test_app() -> (Router, Arc<InMemoryUserStore>) {
    let store = Arc::new(InMemoryUserStore::default());
    let state = AppState::with_store(store.clone(), &test_config());
    (create_router(state), store)
}

/// Response status, the `token` Set-Cookie header (if any) and the body.
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    async fn read(response: Response<Body>) -> Self {
        let status = response.status();
        let set_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("token="))
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Self {
            status,
            set_cookie,
            body,
        }
    }

    /// Token value from the Set-Cookie header.
    pub fn cookie_token(&self) -> Option<String> {
        let cookie = self.set_cookie.as_ref()?;
        let pair = cookie.split(';').next()?;
        pair.strip_prefix("token=").map(str::to_string)
    }
}

/// Send one request through the router. `token` becomes the `token` cookie.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    TestResponse::read(response).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn send_form(app: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    TestResponse::read(response).await
}
