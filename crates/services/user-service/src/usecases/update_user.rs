//! Update use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use domain::validation::check_name;
use domain::{DomainError, DomainResult, OptionExt, UpdateUser, User};

use super::require_id;
use crate::repository::UserRepository;

/// Changes the names of an active user.
pub struct UpdateUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl UpdateUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Update a user.
    ///
    /// Inactive users are immutable: the state check runs before the new
    /// names are looked at. Omitted fields are passed through as `None` and
    /// left unchanged by the repository.
    ///
    /// # Errors
    /// - `Validation` for an empty ID or an empty payload (no repository call)
    /// - `UserNotFound`, `UserInactive`
    /// - `InvalidUserData` for a malformed name (after the lookup)
    pub async fn execute(&self, id: &str, input: UpdateUser) -> DomainResult<User> {
        let id = require_id(id)?;
        if input.is_empty() {
            return Err(DomainError::validation(
                "update",
                "At least one field must be provided for update",
            ));
        }
        debug!(user_id = id, "Updating user");

        let current = self.repo.get_by_id(id).await?.ok_or_user_not_found(id)?;
        if !current.is_active() {
            warn!(user_id = id, "Attempt to update inactive user");
            return Err(DomainError::UserInactive(id.to_string()));
        }

        let input = Self::validate(input)?;
        let user = self.repo.update(id, input).await?;
        info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Check the provided names and return them trimmed.
    ///
    /// Runs after the repository read, so failures are reported as
    /// `InvalidUserData` rather than as argument errors.
    pub fn validate(input: UpdateUser) -> DomainResult<UpdateUser> {
        let first_name = input
            .first_name
            .map(|name| check_name("First name", &name))
            .transpose()
            .map_err(|msg| DomainError::invalid_field("firstName", msg))?;
        let last_name = input
            .last_name
            .map(|name| check_name("Last name", &name))
            .transpose()
            .map_err(|msg| DomainError::invalid_field("lastName", msg))?;

        Ok(UpdateUser {
            first_name,
            last_name,
        })
    }
}
