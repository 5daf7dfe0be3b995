//! Application service layer.

mod dto;
mod user_service;

pub use dto::{UserListResponse, UserResponse, UserStats};
pub use user_service::{UserManager, UserService};
