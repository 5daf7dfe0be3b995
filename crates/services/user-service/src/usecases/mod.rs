//! Use cases - one orchestrator per user operation.
//!
//! Each use case receives its repository explicitly and awaits repository
//! calls one after another, so existence checks always run before the
//! mutation they guard. Argument checks run before the first await.

mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod update_user;

pub use create_user::CreateUserUseCase;
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::ListUsersUseCase;
pub use update_user::UpdateUserUseCase;

use domain::{DomainError, DomainResult};

/// Trimmed, non-empty user ID or a validation error
fn require_id(id: &str) -> DomainResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::validation("id", "User ID is required"));
    }
    Ok(id)
}
