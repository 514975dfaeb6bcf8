//! Domain layer - Core business entities and logic
//!
//! Contains the user entity, its views and the password value object.
//! Nothing in here touches the database or HTTP.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{
    normalize_email, parse_email, NewUser, ProfilePatch, RegisteredUserResponse, User,
    UserResponse, UserRole,
};
