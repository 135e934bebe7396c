//! Result alias used across all Confbak crates.

use crate::error::AppError;

/// Shorthand for results carrying an [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
