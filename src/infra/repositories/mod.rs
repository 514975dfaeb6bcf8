//! Repository layer - Data access abstraction
//!
//! The account store sits behind `UserRepository` so services can be
//! exercised without a database.

pub(crate) mod entities;
mod user_repository;

pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
