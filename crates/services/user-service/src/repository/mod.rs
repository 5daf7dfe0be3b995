//! Repository layer for data access.

mod memory_repository;
mod user_repository;

pub use memory_repository::{demo_users, InMemoryUserStore};
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
