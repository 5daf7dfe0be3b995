//! Repository contract the use cases depend on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use domain::{CreateUser, DomainResult, ListOptions, Paginated, UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations own filtering and pagination semantics and must translate
/// every data-source failure into a `DomainError`. A missing user is reported
/// as `Ok(None)` by the lookup methods, never as an error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of users matching the (already normalized) options
    async fn get_all(&self, options: ListOptions) -> DomainResult<Paginated<User>>;

    /// Find a user by ID
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find a user by email address
    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Persist a new user; the repository assigns the ID
    async fn create(&self, data: CreateUser) -> DomainResult<User>;

    /// Apply the provided fields, leaving omitted ones unchanged
    async fn update(&self, id: &str, data: UpdateUser) -> DomainResult<User>;

    /// Deactivate a user (soft delete)
    async fn delete(&self, id: &str) -> DomainResult<bool>;

    /// Remove a user permanently (hard delete)
    async fn permanent_delete(&self, id: &str) -> DomainResult<bool>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> DomainResult<bool>;

    /// Users created within `[start, end]`
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<User>>;

    /// Number of active users
    async fn get_active_count(&self) -> DomainResult<u64>;

    /// Free-text search over names and email
    async fn search(&self, query: &str, limit: u64) -> DomainResult<Vec<User>>;
}
