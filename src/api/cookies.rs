//! Session cookie contract: `token`, `Path=/`, `HttpOnly`, expiring with the token.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::OffsetDateTime;

use crate::config::{SESSION_COOKIE_NAME, SESSION_COOKIE_PATH};
use crate::errors::{AppError, AppResult};
use crate::services::IssuedToken;

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: &IssuedToken) -> AppResult<Cookie<'static>> {
    let expires = OffsetDateTime::from_unix_timestamp(token.expires_at.timestamp())
        .map_err(|e| AppError::internal(format!("Invalid cookie expiry: {}", e)))?;

    Ok(Cookie::build((SESSION_COOKIE_NAME, token.value.clone()))
        .path(SESSION_COOKIE_PATH)
        .http_only(true)
        .expires(expires)
        .build())
}

/// Empty cookie that expired at the epoch, so browsers drop the session.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path(SESSION_COOKIE_PATH)
        .http_only(true)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Session token sent by the client, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
