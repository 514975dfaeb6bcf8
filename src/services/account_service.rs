//! Account service - registration, login, session checks and profile updates.
//!
//! Stateless: the signed-in user is rebuilt from the session token on
//! every request. Password hashing happens here, before the record is
//! handed to the store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::token::{IssuedToken, SessionTokens};
use crate::config::{
    MSG_EMAIL_TAKEN, MSG_INVALID_CREDENTIALS, MSG_LOGIN_MISSING_FIELDS,
    MSG_REGISTER_MISSING_FIELDS, MSG_USER_DOES_NOT_EXIST, MSG_USER_NOT_FOUND,
};
use crate::domain::{normalize_email, parse_email, NewUser, Password, ProfilePatch, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// A user together with the session token just issued for them
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: IssuedToken,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and sign it in
    async fn register(&self, name: String, email: String, password: String) -> AppResult<SignedIn>;

    /// Check credentials and issue a session token
    async fn login(&self, email: String, password: String) -> AppResult<SignedIn>;

    /// Resolve a session token to a user id
    fn authenticate(&self, token: &str) -> AppResult<Uuid>;

    /// Whether the given token (if any) is currently valid. Never fails.
    fn login_status(&self, token: Option<&str>) -> bool;

    /// Load the signed-in user
    async fn current_user(&self, id: Uuid) -> AppResult<User>;

    /// Update name, phone and address
    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> AppResult<User>;

    /// Update the photo URL
    async fn update_photo(&self, id: Uuid, photo: Option<String>) -> AppResult<User>;

    /// Check that the account store is reachable
    async fn health(&self) -> AppResult<()>;
}

/// Concrete implementation of AccountService.
pub struct Accounts {
    repo: Arc<dyn UserRepository>,
    tokens: SessionTokens,
}

impl Accounts {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: SessionTokens) -> Self {
        Self { repo, tokens }
    }

    fn sign_in(&self, user: User) -> AppResult<SignedIn> {
        let token = self.tokens.issue(user.id)?;
        Ok(SignedIn { user, token })
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(MSG_USER_NOT_FOUND)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[async_trait]
impl AccountService for Accounts {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<SignedIn> {
        if is_blank(&name) || is_blank(&email) || password.is_empty() {
            return Err(AppError::validation(MSG_REGISTER_MISSING_FIELDS));
        }
        Password::check_length(&password)?;
        let email = parse_email(&email)?;

        // Fast path only; the unique index is the real guard
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        let password = Password::new_async(password).await?;
        let user = self
            .repo
            .create(NewUser::new(name.trim().to_string(), email, password))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.sign_in(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<SignedIn> {
        if is_blank(&email) || password.is_empty() {
            return Err(AppError::validation(MSG_LOGIN_MISSING_FIELDS));
        }

        let user = self
            .repo
            .find_by_email(&normalize_email(&email))
            .await?
            .ok_or_else(|| AppError::invalid_credentials(MSG_USER_DOES_NOT_EXIST))?;

        if !user.password().verify_async(password).await {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials(MSG_INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.sign_in(user)
    }

    fn authenticate(&self, token: &str) -> AppResult<Uuid> {
        self.tokens.verify(token)
    }

    fn login_status(&self, token: Option<&str>) -> bool {
        token
            .filter(|t| !t.is_empty())
            .is_some_and(|t| self.tokens.verify(t).is_ok())
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.find_existing(id).await
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> AppResult<User> {
        let mut user = self.find_existing(id).await?;
        user.apply_profile(patch);
        self.repo.save(user).await
    }

    async fn update_photo(&self, id: Uuid, photo: Option<String>) -> AppResult<User> {
        let mut user = self.find_existing(id).await?;
        user.apply_photo(photo);
        self.repo.save(user).await
    }

    async fn health(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
