//! Sync services
//!
//! Orchestrate each CRUD operation across the local store and the MailChimp
//! API. Reads are served from the local mirror only — the mirror assumes no
//! out-of-band remote mutation. Writes are request-scoped dual writes with
//! no cross-request transaction; a failed remote call after a committed
//! local write leaves a documented inconsistency window that is not rolled
//! back automatically.

pub mod list_sync;
pub mod member_sync;
pub mod validation;

pub use list_sync::ListSyncService;
pub use member_sync::MemberSyncService;

use shared::AppError;

// ── Error message builders ──────────────────────────────────────────
//
// Formatting mirrors the bracketed `[Label: value]` segments the proxy's
// clients already parse.

pub(crate) fn list_not_found(list_id: i64) -> AppError {
    AppError::not_found(format!("List not found. [List ID: {list_id}]"))
        .with_detail("list_id", list_id)
}

pub(crate) fn member_not_found(list_id: i64, member_id: i64) -> AppError {
    AppError::not_found(format!(
        "Member not found. [List ID: {list_id}] [Member ID: {member_id}]"
    ))
    .with_detail("list_id", list_id)
    .with_detail("member_id", member_id)
}

pub(crate) fn list_remote_id_missing(list_id: i64) -> AppError {
    AppError::remote_id_missing(format!("MailChimp ID is missing. [List ID: {list_id}]"))
        .with_detail("list_id", list_id)
}

pub(crate) fn member_remote_id_missing(list_id: i64, member_id: i64) -> AppError {
    AppError::remote_id_missing(format!(
        "MailChimp ID is missing. [List ID: {list_id}] [Member ID: {member_id}]"
    ))
    .with_detail("list_id", list_id)
    .with_detail("member_id", member_id)
}

pub(crate) fn duplicate_email(email: &str, list_id: i64) -> AppError {
    AppError::duplicate_email(format!(
        "A list cannot have duplicate Emails address. [Email: {email}] [List ID: {list_id}]"
    ))
    .with_detail("email_address", email)
    .with_detail("list_id", list_id)
}

pub(crate) fn email_quota_exceeded(email: &str) -> AppError {
    AppError::quota_exceeded(format!(
        "The maximum allowance has exceed for this Email address. [Email: {email}]"
    ))
    .with_detail("email_address", email)
}

pub(crate) fn email_change_rejected(original: &str, new: &str) -> AppError {
    AppError::email_change_rejected(format!(
        "Member Email address cannot be changed. [Original Email: {original}] [New Email: {new}]"
    ))
    .with_detail("original_email", original)
    .with_detail("new_email", new)
}
