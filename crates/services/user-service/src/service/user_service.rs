//! User service - application-facing entry points.
//!
//! Resolves the matching use case for every operation and maps entities to
//! transfer shapes. Business rules live in the use cases, not here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Utc};

use domain::{CreateUser, DomainResult, ListOptions, UpdateUser};

use super::dto::{UserListResponse, UserResponse, UserStats};
use crate::repository::UserRepository;
use crate::usecases::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user
    async fn create_user(&self, input: CreateUser) -> DomainResult<UserResponse>;

    /// Get user by ID; `None` if there is no such user
    async fn get_user(&self, id: &str) -> DomainResult<Option<UserResponse>>;

    /// Get user by email; `None` if there is no such user
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<UserResponse>>;

    /// Update the names of an active user
    async fn update_user(&self, id: &str, input: UpdateUser) -> DomainResult<UserResponse>;

    /// Soft delete (deactivate) an active user
    async fn deactivate_user(&self, id: &str) -> DomainResult<bool>;

    /// Permanently delete an inactive user
    async fn delete_user_permanently(&self, id: &str) -> DomainResult<bool>;

    /// One page of users
    async fn list_users(&self, options: Option<ListOptions>) -> DomainResult<UserListResponse>;

    /// Free-text search
    async fn search_users(&self, query: &str, limit: Option<u64>)
        -> DomainResult<Vec<UserResponse>>;

    /// Users created within a date range
    async fn users_created_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<UserResponse>>;

    /// Number of active users
    async fn active_user_count(&self) -> DomainResult<u64>;

    /// Total, active, inactive and new-this-month counts
    async fn get_user_stats(&self) -> DomainResult<UserStats>;
}

/// Concrete implementation of UserService composed from the use cases.
pub struct UserManager {
    create: CreateUserUseCase,
    get: GetUserUseCase,
    update: UpdateUserUseCase,
    delete: DeleteUserUseCase,
    list: ListUsersUseCase,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            create: CreateUserUseCase::new(repo.clone()),
            get: GetUserUseCase::new(repo.clone()),
            update: UpdateUserUseCase::new(repo.clone()),
            delete: DeleteUserUseCase::new(repo.clone()),
            list: ListUsersUseCase::new(repo),
        }
    }

    async fn count_created_since(
        &self,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        // Exactly midnight on the first: nothing can be new yet
        if start >= now {
            return Ok(0);
        }
        let users = self.list.execute_by_date_range(Some(start), Some(now)).await?;
        Ok(users.len() as u64)
    }
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

fn to_responses(users: Vec<domain::User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: CreateUser) -> DomainResult<UserResponse> {
        self.create.execute(input).await.map(UserResponse::from)
    }

    async fn get_user(&self, id: &str) -> DomainResult<Option<UserResponse>> {
        Ok(self.get.execute(id).await?.map(UserResponse::from))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<UserResponse>> {
        Ok(self.get.execute_by_email(email).await?.map(UserResponse::from))
    }

    async fn update_user(&self, id: &str, input: UpdateUser) -> DomainResult<UserResponse> {
        self.update.execute(id, input).await.map(UserResponse::from)
    }

    async fn deactivate_user(&self, id: &str) -> DomainResult<bool> {
        self.delete.execute(id).await
    }

    async fn delete_user_permanently(&self, id: &str) -> DomainResult<bool> {
        self.delete.execute_permanent(id).await
    }

    async fn list_users(&self, options: Option<ListOptions>) -> DomainResult<UserListResponse> {
        self.list.execute(options).await.map(UserListResponse::from)
    }

    async fn search_users(
        &self,
        query: &str,
        limit: Option<u64>,
    ) -> DomainResult<Vec<UserResponse>> {
        self.list.execute_search(query, limit).await.map(to_responses)
    }

    async fn users_created_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<UserResponse>> {
        self.list
            .execute_by_date_range(start, end)
            .await
            .map(to_responses)
    }

    async fn active_user_count(&self) -> DomainResult<u64> {
        self.list.execute_get_active_count().await
    }

    async fn get_user_stats(&self) -> DomainResult<UserStats> {
        let now = Utc::now();
        let month_start = start_of_month(now);

        // Independent reads, no ordering between them
        let (page, active, new_this_month) = futures::try_join!(
            self.list.execute(Some(ListOptions::page(1, 1))),
            self.list.execute_get_active_count(),
            self.count_created_since(month_start, now),
        )?;

        Ok(UserStats {
            total: page.total,
            active,
            inactive: page.total.saturating_sub(active),
            new_this_month,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use domain::{DomainError, Paginated, User};

    use super::*;
    use crate::repository::MockUserRepository;

    #[test]
    fn month_start_is_first_day_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 0).unwrap();
        assert_eq!(
            start_of_month(now),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn stats_aggregate_repository_counts() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_all()
            .withf(|options| *options == ListOptions::page(1, 1))
            .times(1)
            .returning(|_| Ok(Paginated::new(vec![], 12, 1, 1)));
        repo.expect_get_active_count().times(1).returning(|| Ok(9));
        repo.expect_get_by_date_range().returning(|start, _| {
            let user = User::reconstitute("u1", "a@b.com", "Jo", "Li", start, start, true)?;
            Ok(vec![user])
        });

        let stats = UserManager::new(Arc::new(repo)).get_user_stats().await.unwrap();

        assert_eq!(stats.total, 12);
        assert_eq!(stats.active, 9);
        assert_eq!(stats.inactive, 3);
        assert!(stats.new_this_month <= 1);
    }

    #[tokio::test]
    async fn stats_fail_when_any_read_fails() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_all()
            .returning(|_| Err(DomainError::Network("offline".into())));
        repo.expect_get_active_count().returning(|| Ok(0));
        repo.expect_get_by_date_range().returning(|_, _| Ok(vec![]));

        let err = UserManager::new(Arc::new(repo)).get_user_stats().await.unwrap_err();
        assert_eq!(err, DomainError::Network("offline".into()));
    }

    #[tokio::test]
    async fn get_user_maps_to_response() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|id| {
            let created = Utc::now() - Duration::days(1);
            Ok(Some(User::reconstitute(id, "a@b.com", "Jo", "Li", created, created, true)?))
        });

        let response = UserManager::new(Arc::new(repo))
            .get_user("u7")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.id, "u7");
        assert_eq!(response.full_name, "Jo Li");
    }
}
