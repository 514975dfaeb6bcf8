//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default session token lifetime in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted session token lifetime (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "token";

/// Path the session cookie is scoped to
pub const SESSION_COOKIE_PATH: &str = "/";

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_CUSTOMER: &str = "customer";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Profile defaults
// =============================================================================

/// Avatar assigned to accounts that never uploaded a photo
pub const DEFAULT_PHOTO_URL: &str =
    "https://bathanh.com.vn/wp-content/uploads/2017/08/default_avatar.png";

/// Phone placeholder (country prefix only)
pub const DEFAULT_PHONE: &str = "+84";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 4000;

/// Base path the account routes are mounted under
pub const USERS_BASE_PATH: &str = "/api/users";

/// Origins allowed to make credentialed cross-origin requests
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "https://shopwatch.netlify.app"];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_REGISTER_MISSING_FIELDS: &str = "Please fill in all required fields";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const MSG_INVALID_EMAIL: &str = "please enter a valid email";
pub const MSG_EMAIL_TAKEN: &str = "email has already been registered";
pub const MSG_LOGIN_MISSING_FIELDS: &str = "Please add email and password";
pub const MSG_USER_DOES_NOT_EXIST: &str = "User does not exist.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MSG_USER_NOT_FOUND: &str = "User not found";
pub const MSG_NOT_AUTHORIZED: &str = "Not authorized, please login";
pub const MSG_LOGGED_OUT: &str = "Successfully logged out";
