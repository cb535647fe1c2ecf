//! Data models
//!
//! Shared between bridge-server and its tests (via API).
//! All local IDs are `i64`; MailChimp ids are nullable strings that are
//! backfilled after successful remote creates.

pub mod list;
pub mod member;
pub mod serde_helpers;

// Re-exports
pub use list::*;
pub use member::*;
