//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::user_handler;
use crate::domain::{RegisteredUserResponse, UserResponse, UserRole};
use crate::types::MessageResponse;

/// OpenAPI documentation for the account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Accounts API",
        version = "0.1.0",
        description = "Registration, cookie sessions and profile management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        user_handler::register,
        user_handler::login,
        user_handler::logout,
        user_handler::get_user,
        user_handler::login_status,
        user_handler::update_user,
        user_handler::update_photo,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            RegisteredUserResponse,
            MessageResponse,
            user_handler::RegisterRequest,
            user_handler::LoginRequest,
            user_handler::UpdateUserRequest,
            user_handler::UpdatePhotoRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login and profile operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the `token` session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "Session token set by /api/users/login or /api/users/register",
                ))),
            );
        }
    }
}
