//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, Statement,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::MSG_USER_NOT_FOUND;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Email lookups expect the normalized (trimmed, lowercase) form.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; the store assigns the id.
    ///
    /// A duplicate email surfaces as `AppError::Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Persist the mutable profile fields (name, phone, address, photo)
    async fn save(&self, user: User) -> AppResult<User>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.to_string()),
            photo: Set(new_user.photo),
            phone: Set(new_user.phone),
            address: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Unique index violations are remapped to Conflict by From<DbErr>
        let model = active_model.insert(&self.db).await?;
        User::try_from(model)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let existing = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_USER_NOT_FOUND.to_string()))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(user.name);
        active.phone = Set(user.phone);
        active.address = Set(user.address);
        active.photo = Set(user.photo);
        active.updated_at = Set(user.updated_at);

        let model = active.update(&self.db).await?;
        User::try_from(model)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
