//! Error types for the storefront services
//!
//! Cache operations themselves are infallible by design: a miss is `None`
//! and deleting an absent key is a no-op. Errors only arise from the
//! authoritative data source the cache sits in front of, or from invalid
//! request parameters.

use thiserror::Error;

// == Source Error Enum ==
/// Unified error type for the data-source collaborators.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No category matched the requested name
    #[error("no categories found matching: {0}")]
    CategoryNotFound(String),

    /// Product lookup by id failed
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// User lookup by id failed
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A required request parameter was missing or malformed
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The backing store could not be reached
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the storefront services.
pub type Result<T> = std::result::Result<T, SourceError>;
