//! User Service Library
//!
//! User management core: use cases over a repository contract, plus the
//! application-facing service that maps entities to transfer shapes.
//!
//! # Layers
//!
//! - **repository**: the data-access contract and an in-memory store
//! - **usecases**: create, get, update, delete and list/search orchestrators
//! - **service**: one entry point per operation, returning response DTOs

pub mod config;
pub mod repository;
pub mod service;
pub mod usecases;

use std::sync::Arc;

use tracing::info;

use domain::DomainResult;

use crate::config::UserServiceConfig;
use crate::repository::InMemoryUserStore;
use crate::service::UserManager;

/// Build a user service backed by the in-memory store.
pub fn in_memory_service(config: &UserServiceConfig) -> DomainResult<UserManager> {
    let store = if config.seed_demo_data {
        InMemoryUserStore::with_demo_data()?
    } else {
        InMemoryUserStore::new()
    };
    info!(seeded = config.seed_demo_data, "In-memory user store ready");

    Ok(UserManager::new(Arc::new(store)))
}
