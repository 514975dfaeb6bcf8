//! Account handlers mounted under `/api/users`.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::cookies::{cleared_session_cookie, session_cookie, session_token};
use crate::api::extractors::{ValidatedBody, ValidatedJson};
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::config::MSG_LOGGED_OUT;
use crate::domain::{ProfilePatch, RegisteredUserResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(max = 256, message = "Name is too long"))]
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[validate(length(max = 256, message = "Email is too long"))]
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    /// Minimum 6 characters
    #[validate(length(max = 256, message = "Password is too long"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(max = 256, message = "Email is too long"))]
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[validate(length(max = 256, message = "Password is too long"))]
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Profile update; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 256, message = "Name is too long"))]
    #[schema(example = "Ann Lee")]
    pub name: Option<String>,
    #[validate(length(max = 32, message = "Phone is too long"))]
    #[schema(example = "+84 912 345 678")]
    pub phone: Option<String>,
    /// Free-form address document
    #[schema(value_type = Option<Object>)]
    pub address: Option<Value>,
}

/// Photo update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePhotoRequest {
    #[validate(length(max = 2048, message = "Photo URL is too long"))]
    #[schema(example = "https://cdn.example.com/avatars/ann.png")]
    pub photo: Option<String>,
}

/// Create account routes; the profile routes sit behind the session gate.
pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/getuser", get(get_user))
        .route("/updateuser", patch(update_user))
        .route("/updatephoto", patch(update_photo))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/loggedin", get(login_status))
        .merge(protected)
}

/// Register a new user (JSON or urlencoded form body)
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, session cookie set", body = RegisteredUserResponse),
        (status = 400, description = "Missing fields, short password, bad email or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedBody(payload): ValidatedBody<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<RegisteredUserResponse>)> {
    let signed_in = state
        .accounts
        .register(
            payload.name.unwrap_or_default(),
            payload.email.unwrap_or_default(),
            payload.password.unwrap_or_default(),
        )
        .await?;

    let jar = jar.add(session_cookie(&signed_in.token)?);
    let body = RegisteredUserResponse::new(signed_in.user, signed_in.token.value);

    Ok((StatusCode::CREATED, jar, Json(body)))
}

/// Log in with email and password (JSON or urlencoded form body)
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Logged in, session cookie set", body = UserResponse),
        (status = 400, description = "Missing fields, unknown user or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedBody(payload): ValidatedBody<LoginRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let signed_in = state
        .accounts
        .login(
            payload.email.unwrap_or_default(),
            payload.password.unwrap_or_default(),
        )
        .await?;

    let jar = jar.add(session_cookie(&signed_in.token)?);

    // 201 is kept for compatibility with existing clients
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(signed_in.user))))
}

/// Clear the session cookie
#[utoipa::path(
    get,
    path = "/api/users/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(cleared_session_cookie()),
        Json(MessageResponse::new(MSG_LOGGED_OUT)),
    )
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/users/getuser",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "User not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.accounts.current_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Whether the request carries a valid session
#[utoipa::path(
    get,
    path = "/api/users/loggedin",
    tag = "Users",
    responses(
        (status = 200, description = "Login status", body = bool)
    )
)]
pub async fn login_status(State(state): State<AppState>, jar: CookieJar) -> Json<bool> {
    let token = session_token(&jar);
    Json(state.accounts.login_status(token.as_deref()))
}

/// Update name, phone and address
#[utoipa::path(
    patch,
    path = "/api/users/updateuser",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "User not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let patch = ProfilePatch {
        name: payload.name,
        phone: payload.phone,
        address: payload.address,
    };
    let user = state.accounts.update_profile(current_user.id, patch).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the profile photo
#[utoipa::path(
    patch,
    path = "/api/users/updatephoto",
    tag = "Users",
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "User not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_photo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdatePhotoRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .accounts
        .update_photo(current_user.id, payload.photo)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
