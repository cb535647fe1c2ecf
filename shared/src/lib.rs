//! Shared types for the MailChimp bridge
//!
//! Common types used across the server and its tests: error codes and the
//! unified [`error::AppError`] / [`error::ApiResponse`] pair, the list and
//! member models with their payload structs, and ID/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
