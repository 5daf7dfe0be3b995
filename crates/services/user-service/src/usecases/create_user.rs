//! Create use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use domain::validation::{check_email, check_name};
use domain::{CreateUser, DomainError, DomainResult, User};

use crate::repository::UserRepository;

/// Registers a new user after format and uniqueness checks.
pub struct CreateUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl CreateUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Create a user.
    ///
    /// Exactly one existence check is made, followed by at most one create
    /// call. Nothing is retried.
    ///
    /// # Errors
    /// - `Validation` for a malformed email or name (no repository call)
    /// - `UserAlreadyExists` if the email is registered
    pub async fn execute(&self, input: CreateUser) -> DomainResult<User> {
        let input = Self::validate(input)?;
        debug!(email = %input.email, "Creating user");

        if self.repo.exists_by_email(&input.email).await? {
            warn!(email = %input.email, "Email already registered");
            return Err(DomainError::UserAlreadyExists(input.email));
        }

        let user = self.repo.create(input).await?;
        info!(user_id = user.id(), "User created");
        Ok(user)
    }

    /// Check the payload and return it with surrounding whitespace removed.
    pub fn validate(input: CreateUser) -> DomainResult<CreateUser> {
        let email = check_email(&input.email).map_err(|msg| DomainError::validation("email", msg))?;
        let first_name = check_name("First name", &input.first_name)
            .map_err(|msg| DomainError::validation("firstName", msg))?;
        let last_name = check_name("Last name", &input.last_name)
            .map_err(|msg| DomainError::validation("lastName", msg))?;

        Ok(CreateUser {
            email,
            first_name,
            last_name,
        })
    }
}
