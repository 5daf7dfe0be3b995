//! Common utilities shared by every service binary.
//!
//! This crate provides:
//! - Presentation-safe error payloads built from domain errors
//! - Configuration structures and environment helpers
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{ErrorBody, ErrorResponse};
pub use telemetry::init_tracing;
