//! In-memory implementation of the repository contract.
//!
//! Used by the CLI and the integration tests. All reads and writes go through
//! one `RwLock`, so every call observes a consistent snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use domain::{
    CreateUser, DomainError, DomainResult, ListOptions, OptionExt, Paginated, UpdateUser, User,
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE,
};

use super::UserRepository;

/// Newest first, ties broken by ID so pages are stable.
fn newest_first(a: &User, b: &User) -> std::cmp::Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().cmp(b.id()))
}

fn matches_query(user: &User, needle: &str) -> bool {
    user.email().to_lowercase().contains(needle)
        || user.full_name().to_lowercase().contains(needle)
}

/// Thread-safe in-memory user store
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Create a store pre-filled with a small set of sample users.
    pub fn with_demo_data() -> DomainResult<Self> {
        Ok(Self::with_users(demo_users()?))
    }

    /// Number of stored users, active or not
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn get_all(&self, options: ListOptions) -> DomainResult<Paginated<User>> {
        let users = self.users.read().await;
        let needle = options.search.as_deref().map(|s| s.trim().to_lowercase());

        let mut matching: Vec<&User> = users
            .values()
            .filter(|user| needle.as_deref().map_or(true, |n| matches_query(user, n)))
            .collect();
        matching.sort_by(|a, b| newest_first(a, b));

        let page = options.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
        let limit = options.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = ListOptions::page(page, limit).offset();
        let total = matching.len() as u64;

        let items = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Paginated::new(items, total, page, limit))
    }

    async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.email().eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn create(&self, data: CreateUser) -> DomainResult<User> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|user| user.email().eq_ignore_ascii_case(data.email.trim()));
        if email_taken {
            return Err(DomainError::UserAlreadyExists(data.email));
        }

        let user = User::new(
            Uuid::new_v4().to_string(),
            &data.email,
            &data.first_name,
            &data.last_name,
        )?;
        users.insert(user.id().to_string(), user.clone());
        debug!(user_id = user.id(), "Stored new user");

        Ok(user)
    }

    async fn update(&self, id: &str, data: UpdateUser) -> DomainResult<User> {
        let mut users = self.users.write().await;
        let current = users.get(id).ok_or_user_not_found(id)?;

        let first_name = data.first_name.as_deref().unwrap_or(current.first_name());
        let last_name = data.last_name.as_deref().unwrap_or(current.last_name());
        let updated = current.update_info(first_name, last_name)?;

        users.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let mut users = self.users.write().await;
        let current = users.get(id).ok_or_user_not_found(id)?;

        if !current.is_active() {
            return Ok(false);
        }

        let deactivated = current.deactivate();
        users.insert(id.to_string(), deactivated);
        Ok(true)
    }

    async fn permanent_delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<User>> {
        let users = self.users.read().await;

        let mut in_range: Vec<User> = users
            .values()
            .filter(|user| user.created_at() >= start && user.created_at() <= end)
            .cloned()
            .collect();
        in_range.sort_by_key(|user| user.created_at());

        Ok(in_range)
    }

    async fn get_active_count(&self) -> DomainResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|user| user.is_active()).count() as u64)
    }

    async fn search(&self, query: &str, limit: u64) -> DomainResult<Vec<User>> {
        let users = self.users.read().await;
        let needle = query.trim().to_lowercase();

        let mut found: Vec<&User> = users
            .values()
            .filter(|user| matches_query(user, &needle))
            .collect();
        found.sort_by(|a, b| newest_first(a, b));

        Ok(found
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

/// Sample users, created over the past few weeks; the last two are inactive.
pub fn demo_users() -> DomainResult<Vec<User>> {
    const SAMPLES: &[(&str, &str, &str, i64, bool)] = &[
        ("ana.garcia@example.com", "Ana", "Garcia", 1, true),
        ("bruno.silva@example.com", "Bruno", "Silva", 3, true),
        ("carla.mendes@example.com", "Carla", "Mendes", 8, true),
        ("diego.torres@example.com", "Diego", "Torres", 15, true),
        ("elena.rossi@example.com", "Elena", "Rossi", 24, true),
        ("felipe.nunez@example.com", "Felipe", "Nunez", 40, false),
        ("gloria.vidal@example.com", "Gloria", "Vidal", 62, false),
    ];

    let now = Utc::now();
    SAMPLES
        .iter()
        .enumerate()
        .map(|(index, &(email, first_name, last_name, days_ago, is_active))| {
            let created_at = now - Duration::days(days_ago);
            User::reconstitute(
                format!("demo-{}", index + 1),
                email,
                first_name,
                last_name,
                created_at,
                created_at,
                is_active,
            )
        })
        .collect()
}
