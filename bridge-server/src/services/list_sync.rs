//! List sync service
//!
//! Orchestrates list CRUD across the local store and MailChimp. Create
//! persists locally before the remote call so a local identifier always
//! exists; update writes locally first and then patches the remote copy;
//! delete is remote-first so a failed remote delete leaves the mirror
//! intact.

use serde_json::Value;
use shared::models::{List, ListCreate, ListUpdate};
use shared::{AppError, AppResult, util};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{list_not_found, list_remote_id_missing, validation};
use crate::db::repository::list as list_repo;
use crate::mailchimp::MailChimpApi;

pub struct ListSyncService {
    pool: SqlitePool,
    remote: Arc<dyn MailChimpApi>,
}

impl ListSyncService {
    pub fn new(pool: SqlitePool, remote: Arc<dyn MailChimpApi>) -> Self {
        Self { pool, remote }
    }

    /// Create a list locally, then on MailChimp, then backfill the remote id
    ///
    /// A failed remote call surfaces the error but leaves the local row in
    /// place without a MailChimp id.
    pub async fn create(&self, payload: ListCreate) -> AppResult<List> {
        let now = util::now_millis();
        let mut list = payload.to_list(util::snowflake_id(), now);
        validation::validate_list_create(&payload, &list)?;

        list_repo::create(&self.pool, &list).await?;

        let response = self.remote.post("lists", &list.to_mailchimp_body()).await?;
        let remote_id = extract_remote_id(&response)?;
        list_repo::set_mail_chimp_id(&self.pool, list.list_id, &remote_id).await?;
        list.mail_chimp_id = Some(remote_id);

        tracing::info!(list_id = list.list_id, "List created and synced");
        Ok(list)
    }

    /// Read one list from the local mirror
    pub async fn get(&self, list_id: i64) -> AppResult<List> {
        list_repo::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| list_not_found(list_id))
    }

    /// Read all lists from the local mirror
    pub async fn get_all(&self) -> AppResult<Vec<List>> {
        Ok(list_repo::find_all(&self.pool).await?)
    }

    /// Merge an update into the local row, then patch the remote copy
    pub async fn update(&self, list_id: i64, payload: ListUpdate) -> AppResult<List> {
        let mut list = self.get(list_id).await?;
        list.apply_update(&payload);
        validation::validate_list(&list)?;

        let mail_chimp_id = list
            .mail_chimp_id
            .clone()
            .ok_or_else(|| list_remote_id_missing(list_id))?;

        list.updated_at = util::now_millis();
        list_repo::update(&self.pool, &list).await?;
        self.remote
            .patch(&format!("lists/{mail_chimp_id}"), &list.to_mailchimp_body())
            .await?;

        tracing::info!(list_id, "List updated and synced");
        Ok(list)
    }

    /// Delete the remote copy first, the local row only after remote success
    pub async fn delete(&self, list_id: i64) -> AppResult<()> {
        let list = self.get(list_id).await?;
        let mail_chimp_id = list
            .mail_chimp_id
            .ok_or_else(|| list_remote_id_missing(list_id))?;

        self.remote
            .delete(&format!("lists/{mail_chimp_id}"))
            .await?;
        list_repo::delete(&self.pool, list_id).await?;

        tracing::info!(list_id, "List deleted");
        Ok(())
    }
}

/// Pull the resource id out of a MailChimp create/update response
pub(crate) fn extract_remote_id(response: &Value) -> AppResult<String> {
    response
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::upstream("MailChimp response did not include an id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_remote_id() {
        let id = extract_remote_id(&serde_json::json!({"id": "abc123"})).unwrap();
        assert_eq!(id, "abc123");

        assert!(extract_remote_id(&serde_json::json!({})).is_err());
        assert!(extract_remote_id(&serde_json::json!({"id": ""})).is_err());
        assert!(extract_remote_id(&serde_json::json!({"id": 42})).is_err());
    }
}
