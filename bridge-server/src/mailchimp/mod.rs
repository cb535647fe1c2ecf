//! MailChimp remote API
//!
//! The sync services talk to MailChimp through the [`MailChimpApi`] trait;
//! [`client::MailChimpClient`] is the reqwest implementation, tests inject
//! scripted doubles.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;
use shared::AppResult;

/// Thin synchronous-per-request wrapper over the MailChimp v3 REST API
///
/// Paths are relative to the API root (`lists`, `lists/{id}/members`, ...).
/// Results are the decoded JSON body; list and member resources carry at
/// least an `id` field.
#[async_trait]
pub trait MailChimpApi: Send + Sync {
    async fn post(&self, path: &str, body: &Value) -> AppResult<Value>;
    async fn get(&self, path: &str) -> AppResult<Value>;
    async fn patch(&self, path: &str, body: &Value) -> AppResult<Value>;
    async fn delete(&self, path: &str) -> AppResult<()>;
}

pub use client::MailChimpClient;
