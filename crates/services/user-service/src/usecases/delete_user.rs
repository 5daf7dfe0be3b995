//! Delete use case: soft and hard delete.
//!
//! A user moves `Active -> Inactive -> Removed`. Skipping a state is reported
//! as an error and never corrected silently.

use std::sync::Arc;

use tracing::{debug, info, warn};

use domain::{DomainError, DomainResult, OptionExt, User};

use super::require_id;
use crate::repository::UserRepository;

/// Rule name reported when a hard delete targets an active user
pub const RULE_DEACTIVATE_BEFORE_DELETE: &str = "deactivate-before-delete";

pub struct DeleteUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl DeleteUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, id: &str) -> DomainResult<User> {
        self.repo.get_by_id(id).await?.ok_or_user_not_found(id)
    }

    /// Soft delete: deactivate an active user.
    ///
    /// # Errors
    /// `UserNotFound`, or `UserInactive` if the user is already inactive.
    pub async fn execute(&self, id: &str) -> DomainResult<bool> {
        let id = require_id(id)?;
        debug!(user_id = id, "Deactivating user");

        let user = self.fetch(id).await?;
        if !user.is_active() {
            warn!(user_id = id, "User is already inactive");
            return Err(DomainError::UserInactive(id.to_string()));
        }

        let deleted = self.repo.delete(id).await?;
        info!(user_id = id, deleted, "User deactivated");
        Ok(deleted)
    }

    /// Hard delete: permanently remove an inactive user.
    ///
    /// # Errors
    /// `UserNotFound`, or `BusinessRuleViolation` if the user is still active.
    pub async fn execute_permanent(&self, id: &str) -> DomainResult<bool> {
        let id = require_id(id)?;
        debug!(user_id = id, "Permanently deleting user");

        let user = self.fetch(id).await?;
        if user.is_active() {
            warn!(user_id = id, "Refusing to permanently delete an active user");
            return Err(DomainError::business_rule(
                RULE_DEACTIVATE_BEFORE_DELETE,
                "The user must be deactivated before it can be permanently deleted.",
            ));
        }

        let removed = self.repo.permanent_delete(id).await?;
        info!(user_id = id, removed, "User permanently deleted");
        Ok(removed)
    }
}
