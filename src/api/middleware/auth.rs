//! Session cookie authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::cookies::session_token;
use crate::api::AppState;
use crate::errors::AppError;

/// Authenticated user extracted from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Session authentication middleware.
///
/// Reads the `token` cookie, verifies it and injects the CurrentUser into
/// the request extensions. Missing or invalid tokens stop the request
/// with 401 before the handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar).ok_or(AppError::Unauthorized)?;
    let id = state.accounts.authenticate(&token)?;

    request.extensions_mut().insert(CurrentUser { id });

    Ok(next.run(request).await)
}
