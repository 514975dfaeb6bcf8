//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. They depend on
//! the `UserRepository` abstraction, never on a concrete store.

mod account_service;
pub mod token;

pub use account_service::{AccountService, Accounts, SignedIn};
pub use token::{Claims, IssuedToken, SessionTokens};
