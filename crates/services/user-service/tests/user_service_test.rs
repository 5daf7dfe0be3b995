//! User service integration tests against the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use domain::{CreateUser, DomainError, ListOptions, UpdateUser, User};
use user_service_lib::repository::{InMemoryUserStore, UserRepository};
use user_service_lib::service::{UserManager, UserService};

fn service_with(store: &InMemoryUserStore) -> UserManager {
    UserManager::new(Arc::new(store.clone()))
}

fn user_created_days_ago(id: &str, email: &str, days: i64, is_active: bool) -> User {
    let created = Utc::now() - Duration::days(days);
    User::reconstitute(id, email, "Test", "Person", created, created, is_active).unwrap()
}

#[tokio::test]
async fn test_create_user_scenario() {
    let store = InMemoryUserStore::new();
    let service = service_with(&store);

    let created = service
        .create_user(CreateUser::new("a@b.com", "Jo", "Li"))
        .await
        .unwrap();

    assert!(created.is_active);
    assert!(!created.id.is_empty());
    assert_eq!(created.full_name, "Jo Li");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_duplicate_email_fails() {
    let store = InMemoryUserStore::new();
    let service = service_with(&store);

    service
        .create_user(CreateUser::new("a@b.com", "Jo", "Li"))
        .await
        .unwrap();
    let err = service
        .create_user(CreateUser::new("a@b.com", "Ana", "Ro"))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::UserAlreadyExists("a@b.com".into()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_invalid_create_leaves_store_untouched() {
    let store = InMemoryUserStore::new();
    let service = service_with(&store);

    let err = service
        .create_user(CreateUser::new("not-an-email", "Jo", "Li"))
        .await
        .unwrap_err();

    assert!(err.is_argument_error());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let store = InMemoryUserStore::new();
    let service = service_with(&store);

    let user = service
        .create_user(CreateUser::new("a@b.com", "Jo", "Li"))
        .await
        .unwrap();

    // Active users cannot skip straight to removal
    let err = service.delete_user_permanently(&user.id).await.unwrap_err();
    assert_eq!(err.code(), "BUSINESS_RULE_VIOLATION");

    let updated = service
        .update_user(
            &user.id,
            UpdateUser {
                first_name: Some("Joanna".into()),
                last_name: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Joanna Li");
    assert_eq!(updated.created_at, user.created_at);

    assert!(service.deactivate_user(&user.id).await.unwrap());
    assert_eq!(
        service.deactivate_user(&user.id).await.unwrap_err(),
        DomainError::UserInactive(user.id.clone())
    );

    let err = service
        .update_user(
            &user.id,
            UpdateUser {
                first_name: None,
                last_name: Some("Lim".into()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::UserInactive(user.id.clone()));

    assert!(service.delete_user_permanently(&user.id).await.unwrap());
    assert!(service.get_user(&user.id).await.unwrap().is_none());
    assert_eq!(
        service.delete_user_permanently(&user.id).await.unwrap_err(),
        DomainError::UserNotFound(user.id.clone())
    );
}

#[tokio::test]
async fn test_get_by_email_returns_none_when_missing() {
    let service = service_with(&InMemoryUserStore::new());

    assert!(service
        .get_user_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_normalizes_options() {
    let users = (0..120).map(|i| {
        user_created_days_ago(&format!("u{i}"), &format!("user{i}@x.com"), 1, true)
    });
    let service = service_with(&InMemoryUserStore::with_users(users));

    let page = service
        .list_users(Some(ListOptions {
            page: Some(0),
            limit: Some(500),
            search: Some("a".into()),
        }))
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 100);
    assert_eq!(page.users.len(), 100);
    assert_eq!(page.total, 120);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_list_past_last_page_is_empty() {
    let store = InMemoryUserStore::with_users([
        user_created_days_ago("u1", "a@x.com", 3, true),
        user_created_days_ago("u2", "b@x.com", 2, true),
        user_created_days_ago("u3", "c@x.com", 1, true),
    ]);
    let service = service_with(&store);

    let beyond = service
        .list_users(Some(ListOptions::page(5, 10)))
        .await
        .unwrap();
    assert!(beyond.users.is_empty());
    assert_eq!((beyond.total, beyond.page, beyond.total_pages), (3, 5, 1));

    let demo = service_with(&InMemoryUserStore::with_demo_data().unwrap());
    let last = demo
        .list_users(Some(ListOptions::page(u64::MAX, 100)))
        .await
        .unwrap();
    assert!(last.users.is_empty());
    assert_eq!(last.total, 7);
    assert_eq!(last.page, u64::MAX);
}

#[tokio::test]
async fn test_list_defaults_and_search() {
    let store = InMemoryUserStore::with_users([
        user_created_days_ago("u1", "maria@x.com", 2, true),
        user_created_days_ago("u2", "pedro@x.com", 1, true),
    ]);
    let service = service_with(&store);

    let all = service.list_users(None).await.unwrap();
    assert_eq!((all.page, all.limit, all.total), (1, 10, 2));
    assert_eq!(all.users[0].id, "u2");

    let found = service.search_users("MARIA", None).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "maria@x.com");
}

#[tokio::test]
async fn test_date_range_and_stats() {
    let store = InMemoryUserStore::with_users([
        user_created_days_ago("recent", "recent@x.com", 0, true),
        user_created_days_ago("old", "old@x.com", 400, false),
        user_created_days_ago("older", "older@x.com", 500, true),
    ]);
    let service = service_with(&store);

    let now = Utc::now();
    let last_year = service
        .users_created_between(Some(now - Duration::days(450)), Some(now - Duration::days(300)))
        .await
        .unwrap();
    assert_eq!(last_year.len(), 1);
    assert_eq!(last_year[0].id, "old");

    let err = service
        .users_created_between(Some(now + Duration::days(1)), Some(now + Duration::days(2)))
        .await
        .unwrap_err();
    assert!(err.is_argument_error());

    let stats = service.get_user_stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.inactive, 1);
    assert_eq!(service.active_user_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_concurrent_creates_with_same_email_store_one_user() {
    let store = InMemoryUserStore::new();
    let service = Arc::new(service_with(&store));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_user(CreateUser::new("same@x.com", "Jo", "Li"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err, DomainError::UserAlreadyExists("same@x.com".into())),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_store_is_usable_through_the_contract() {
    let store: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());

    let user = store
        .create(CreateUser::new("a@b.com", "Jo", "Li"))
        .await
        .unwrap();
    assert!(store.exists_by_email("A@B.COM").await.unwrap());
    assert_eq!(store.get_by_email("a@b.com").await.unwrap(), Some(user));
}
