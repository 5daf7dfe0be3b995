//! List and search use case.
//!
//! A normalization and validation gate in front of the repository, which owns
//! filtering and pagination.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use domain::{
    DomainError, DomainResult, ListOptions, Paginated, User, DEFAULT_PAGE_NUMBER,
    DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_LIMIT, MAX_PAGE_SIZE, MIN_PAGE_SIZE, MIN_SEARCH_LENGTH,
};

use crate::repository::UserRepository;

fn clamp_limit(limit: Option<u64>, default: u64) -> u64 {
    limit.unwrap_or(default).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

pub struct ListUsersUseCase {
    repo: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Normalize listing options.
    ///
    /// Page defaults to 1 and is at least 1; limit defaults to 10 and is
    /// clamped to `[1, 100]`; a search term shorter than two characters after
    /// trimming is dropped rather than rejected.
    pub fn normalize(options: Option<ListOptions>) -> ListOptions {
        let options = options.unwrap_or_default();

        let search = options
            .search
            .map(|term| term.trim().to_string())
            .filter(|term| term.chars().count() >= MIN_SEARCH_LENGTH);

        ListOptions {
            page: Some(options.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1)),
            limit: Some(clamp_limit(options.limit, DEFAULT_PAGE_SIZE)),
            search,
        }
    }

    /// One page of users
    pub async fn execute(&self, options: Option<ListOptions>) -> DomainResult<Paginated<User>> {
        let options = Self::normalize(options);
        debug!(?options, "Listing users");
        self.repo.get_all(options).await
    }

    /// Free-text search; the trimmed query needs at least two characters.
    pub async fn execute_search(&self, query: &str, limit: Option<u64>) -> DomainResult<Vec<User>> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Err(DomainError::validation(
                "query",
                format!(
                    "Search query must be at least {} characters long",
                    MIN_SEARCH_LENGTH
                ),
            ));
        }

        let limit = clamp_limit(limit, DEFAULT_SEARCH_LIMIT);
        debug!(query, limit, "Searching users");
        self.repo.search(query, limit).await
    }

    /// Users created between `start` and `end`.
    ///
    /// Both dates are required, `start` must precede `end` and must not lie
    /// in the future.
    pub async fn execute_by_date_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<User>> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(DomainError::validation(
                    "dateRange",
                    "Both start and end dates are required",
                ))
            }
        };
        if start >= end {
            return Err(DomainError::validation(
                "dateRange",
                "Start date must be before end date",
            ));
        }
        if start > Utc::now() {
            return Err(DomainError::validation(
                "dateRange",
                "Start date cannot be in the future",
            ));
        }

        debug!(%start, %end, "Listing users by creation date");
        self.repo.get_by_date_range(start, end).await
    }

    /// Number of active users
    pub async fn execute_get_active_count(&self) -> DomainResult<u64> {
        self.repo.get_active_count().await
    }
}
