//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Password;
use crate::config::{
    is_valid_role, DEFAULT_PHONE, DEFAULT_PHOTO_URL, MSG_INVALID_EMAIL, ROLE_ADMIN, ROLE_CUSTOMER,
};
use crate::errors::{AppError, AppResult};

/// Accepts `local@dotted.domain` with a 2+ letter TLD, a quoted local part,
/// or a bracketed IPv4 literal as the domain.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is valid")
});

/// Canonical form used for storage and lookups.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize and check an email address against the accepted shape.
pub fn parse_email(raw: &str) -> AppResult<String> {
    let email = normalize_email(raw);
    if EMAIL_PATTERN.is_match(&email) {
        Ok(email)
    } else {
        Err(AppError::validation(MSG_INVALID_EMAIL))
    }
}

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Customer => ROLE_CUSTOMER,
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if !is_valid_role(s) {
            return Err(AppError::internal(format!("Unknown role '{}'", s)));
        }
        Ok(if s == ROLE_ADMIN {
            UserRole::Admin
        } else {
            UserRole::Customer
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub photo: String,
    pub phone: String,
    pub address: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Stored password as a verifiable value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }

    /// Apply a profile patch. Omitted or blank fields keep their current
    /// value. Returns whether anything changed.
    pub fn apply_profile(&mut self, patch: ProfilePatch) -> bool {
        let mut changed = false;

        if let Some(name) = non_blank(patch.name) {
            changed |= replace(&mut self.name, name);
        }
        if let Some(phone) = non_blank(patch.phone) {
            changed |= replace(&mut self.phone, phone);
        }
        if let Some(address) = patch.address.filter(|a| !a.is_null()) {
            if self.address.as_ref() != Some(&address) {
                self.address = Some(address);
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Replace the photo URL unless the new value is omitted or blank.
    pub fn apply_photo(&mut self, photo: Option<String>) -> bool {
        let changed = match non_blank(photo) {
            Some(photo) => replace(&mut self.photo, photo),
            None => false,
        };
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// A user about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub photo: String,
    pub phone: String,
}

impl NewUser {
    /// New customer account with the default photo and phone.
    pub fn new(name: String, email: String, password: Password) -> Self {
        Self {
            name,
            email,
            password_hash: password.into_string(),
            role: UserRole::default(),
            photo: DEFAULT_PHOTO_URL.to_string(),
            phone: DEFAULT_PHONE.to_string(),
        }
    }
}

/// Profile fields a signed-in user may change
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Value>,
}

/// User view returned to clients (everything but the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    pub role: UserRole,
    #[schema(example = "https://bathanh.com.vn/wp-content/uploads/2017/08/default_avatar.png")]
    pub photo: String,
    #[schema(example = "+84")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub address: Option<Value>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            photo: user.photo,
            phone: user.phone,
            address: user.address,
        }
    }
}

/// Registration view: identity, role and the freshly issued token
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisteredUserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Session token (also set as the `token` cookie)
    pub token: String,
}

impl RegisteredUserResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        }
    }
}
