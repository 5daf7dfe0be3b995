//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Email format accepted by the user entity and the create use case
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Names may only contain letters and whitespace
pub const NAME_PATTERN: &str = r"^[\p{L}\s]+$";

/// Minimum name length requirement (after trimming)
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length of a search term
pub const MIN_SEARCH_LENGTH: usize = 2;

// =============================================================================
// Pagination
// =============================================================================

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Minimum allowed items per page
pub const MIN_PAGE_SIZE: u64 = 1;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default number of results returned by a free-text search
pub const DEFAULT_SEARCH_LIMIT: u64 = 20;

// =============================================================================
// Transport status codes
// =============================================================================

/// Status reported by the transport for malformed requests
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Status reported by the transport for missing resources
pub const STATUS_NOT_FOUND: u16 = 404;

/// Status reported by the transport for uniqueness conflicts
pub const STATUS_CONFLICT: u16 = 409;
