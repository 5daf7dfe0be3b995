//! Get use case.

use std::sync::Arc;

use tracing::debug;

use domain::validation::check_email;
use domain::{DomainError, DomainResult, User};

use super::require_id;
use crate::repository::UserRepository;

/// Looks users up by ID or email. Finding nothing is not an error.
pub struct GetUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Find a user by ID
    pub async fn execute(&self, id: &str) -> DomainResult<Option<User>> {
        let id = require_id(id)?;
        debug!(user_id = id, "Fetching user");
        self.repo.get_by_id(id).await
    }

    /// Find a user by email; the email must be well formed
    pub async fn execute_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = check_email(email).map_err(|msg| DomainError::validation("email", msg))?;
        debug!(email = %email, "Fetching user by email");
        self.repo.get_by_email(&email).await
    }
}
