use crate::shared::error::StigError;

/// Type alias for Result with StigError as the error type.
/// Library operations return typed errors so callers can match on the failure kind.
pub type Result<T> = std::result::Result<T, StigError>;
