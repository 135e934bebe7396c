//! # confbak-core
//!
//! Core crate for Confbak. Contains the configuration schema, the domain
//! types carried by extension hook invocations, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Confbak crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
