//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the validated `User` entity, the `DomainError` taxonomy and the listing
//! types exchanged with any repository implementation.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{lookup_result, DomainError, DomainResult, FieldErrors, OptionExt, TransportFailure};
pub use pagination::{ListOptions, Paginated};
pub use user::{CreateUser, UpdateUser, User, UserData};
