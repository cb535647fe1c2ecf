//! Member sync service
//!
//! Orchestrates member CRUD across the local store and MailChimp. Create
//! runs the duplicate-email and quota gates before any write or remote
//! call; update and delete are remote-first so the mirror only changes
//! after MailChimp accepted the operation. A member's email address is
//! immutable through the update path — changing it would reassign the
//! MailChimp id.

use serde_json::Value;
use shared::models::{Member, MemberCreate, MemberUpdate, normalize_email};
use shared::{AppResult, util};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::list_sync::extract_remote_id;
use super::{
    duplicate_email, email_change_rejected, email_quota_exceeded, list_not_found,
    list_remote_id_missing, member_not_found, member_remote_id_missing, validation,
};
use crate::db::repository::{list as list_repo, member as member_repo};
use crate::mailchimp::MailChimpApi;

/// Maximum number of members that may share one email address across all
/// lists — MailChimp blocks further signups for the same address
pub const MAX_EMAIL_SIGNUP_ALLOWED: i64 = 3;

pub struct MemberSyncService {
    pool: SqlitePool,
    remote: Arc<dyn MailChimpApi>,
}

impl MemberSyncService {
    pub fn new(pool: SqlitePool, remote: Arc<dyn MailChimpApi>) -> Self {
        Self { pool, remote }
    }

    /// Create a member under a synced list
    ///
    /// Gate order: list exists → list has a MailChimp id → duplicate email
    /// in list → global email quota → schema validation. Only then the
    /// local insert and the remote create run; the remote id is backfilled
    /// afterwards. A failed remote call leaves the local row without a
    /// MailChimp id.
    pub async fn create(&self, path_list_id: i64, payload: MemberCreate) -> AppResult<Member> {
        // the body may carry its own list_id; the path is the default
        let list_id = payload.list_id.unwrap_or(path_list_id);

        let list = list_repo::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| list_not_found(list_id))?;
        let list_mc_id = list
            .mail_chimp_id
            .ok_or_else(|| list_remote_id_missing(list_id))?;

        let email = payload.email_address.clone().unwrap_or_default();
        let normalized = normalize_email(&email);
        if !normalized.is_empty() {
            if member_repo::find_by_list_and_email(&self.pool, list_id, &normalized)
                .await?
                .is_some()
            {
                return Err(duplicate_email(&email, list_id));
            }
            if member_repo::count_by_email(&self.pool, &normalized).await?
                >= MAX_EMAIL_SIGNUP_ALLOWED
            {
                return Err(email_quota_exceeded(&email));
            }
        }

        let now = util::now_millis();
        let mut member = payload.to_member(util::snowflake_id(), list_id, now);
        validation::validate_member(&member)?;

        member_repo::create(&self.pool, &member).await?;

        let response = self
            .remote
            .post(
                &format!("lists/{list_mc_id}/members"),
                &member.to_mailchimp_body(),
            )
            .await?;
        member.mail_chimp_id = Some(extract_remote_id(&response)?);
        member.email_id = string_field(&response, "email_id");
        member.unique_email_id = string_field(&response, "unique_email_id");
        member.member_rating = response.get("member_rating").and_then(Value::as_i64);
        member.updated_at = util::now_millis();
        member_repo::set_remote_fields(&self.pool, &member).await?;

        tracing::info!(
            list_id,
            member_id = member.member_id,
            "Member created and synced"
        );
        Ok(member)
    }

    /// Read one member of a list from the local mirror
    pub async fn get(&self, list_id: i64, member_id: i64) -> AppResult<Member> {
        self.require_list(list_id).await?;
        member_repo::find_by_list_and_id(&self.pool, list_id, member_id)
            .await?
            .ok_or_else(|| member_not_found(list_id, member_id))
    }

    /// Read all members of a list from the local mirror
    pub async fn get_for_list(&self, list_id: i64) -> AppResult<Vec<Member>> {
        self.require_list(list_id).await?;
        Ok(member_repo::find_by_list(&self.pool, list_id).await?)
    }

    /// Patch the remote copy, then persist the merged row locally
    ///
    /// A changed email address is rejected before any write. MailChimp may
    /// reassign the member id on certain field changes; a different id in
    /// the response is adopted before the local write.
    pub async fn update(
        &self,
        list_id: i64,
        member_id: i64,
        payload: MemberUpdate,
    ) -> AppResult<Member> {
        let list = list_repo::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| list_not_found(list_id))?;
        let mut member = member_repo::find_by_list_and_id(&self.pool, list_id, member_id)
            .await?
            .ok_or_else(|| member_not_found(list_id, member_id))?;

        if let Some(new_email) = payload.email_address.as_deref() {
            let new_normalized = normalize_email(new_email);
            let original_normalized = normalize_email(&member.email_address);
            if !new_normalized.is_empty() && new_normalized != original_normalized {
                return Err(email_change_rejected(&original_normalized, &new_normalized));
            }
        }

        member.apply_update(&payload);
        validation::validate_member(&member)?;

        let list_mc_id = list
            .mail_chimp_id
            .ok_or_else(|| member_remote_id_missing(list_id, member_id))?;
        let member_mc_id = member
            .mail_chimp_id
            .clone()
            .ok_or_else(|| member_remote_id_missing(list_id, member_id))?;

        let response = self
            .remote
            .patch(
                &format!("lists/{list_mc_id}/members/{member_mc_id}"),
                &member.to_mailchimp_body(),
            )
            .await?;
        let remote_id = extract_remote_id(&response)?;
        if remote_id != member_mc_id {
            member.mail_chimp_id = Some(remote_id);
        }

        member.updated_at = util::now_millis();
        member_repo::update(&self.pool, &member).await?;

        tracing::info!(list_id, member_id, "Member updated and synced");
        Ok(member)
    }

    /// Delete the remote copy first, the local row only after remote success
    pub async fn delete(&self, list_id: i64, member_id: i64) -> AppResult<()> {
        let list = list_repo::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| list_not_found(list_id))?;
        let member = member_repo::find_by_list_and_id(&self.pool, list_id, member_id)
            .await?
            .ok_or_else(|| member_not_found(list_id, member_id))?;

        let list_mc_id = list
            .mail_chimp_id
            .ok_or_else(|| member_remote_id_missing(list_id, member_id))?;
        let member_mc_id = member
            .mail_chimp_id
            .ok_or_else(|| member_remote_id_missing(list_id, member_id))?;

        self.remote
            .delete(&format!("lists/{list_mc_id}/members/{member_mc_id}"))
            .await?;
        member_repo::delete(&self.pool, member_id).await?;

        tracing::info!(list_id, member_id, "Member deleted");
        Ok(())
    }

    async fn require_list(&self, list_id: i64) -> AppResult<()> {
        list_repo::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| list_not_found(list_id))?;
        Ok(())
    }
}

fn string_field(response: &Value, field: &str) -> Option<String> {
    response
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}
