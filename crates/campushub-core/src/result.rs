//! Convenience result type alias for CampusHub.

use crate::error::AppError;

/// A specialized `Result` type for CampusHub operations.
pub type AppResult<T> = Result<T, AppError>;
