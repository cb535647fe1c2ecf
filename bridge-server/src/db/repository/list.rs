//! List Repository

use super::{RepoError, RepoResult};
use shared::models::{CampaignDefaults, List, ListContact};
use sqlx::SqlitePool;

const LIST_SELECT: &str = "SELECT list_id, mail_chimp_id, name, contact, campaign_defaults, \
     email_type_option, permission_reminder, visibility, notify_on_subscribe, \
     notify_on_unsubscribe, use_archive_bar, created_at, updated_at FROM lists";

/// Raw row with JSON TEXT columns still serialized
#[derive(sqlx::FromRow)]
struct ListRow {
    list_id: i64,
    mail_chimp_id: Option<String>,
    name: String,
    contact: String,
    campaign_defaults: String,
    email_type_option: bool,
    permission_reminder: String,
    visibility: Option<String>,
    notify_on_subscribe: Option<String>,
    notify_on_unsubscribe: Option<String>,
    use_archive_bar: Option<bool>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ListRow> for List {
    type Error = RepoError;

    fn try_from(row: ListRow) -> RepoResult<Self> {
        let contact: ListContact = serde_json::from_str(&row.contact)?;
        let campaign_defaults: CampaignDefaults = serde_json::from_str(&row.campaign_defaults)?;
        Ok(List {
            list_id: row.list_id,
            mail_chimp_id: row.mail_chimp_id,
            name: row.name,
            contact,
            campaign_defaults,
            email_type_option: row.email_type_option,
            permission_reminder: row.permission_reminder,
            visibility: row.visibility,
            notify_on_subscribe: row.notify_on_subscribe,
            notify_on_unsubscribe: row.notify_on_unsubscribe,
            use_archive_bar: row.use_archive_bar,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub async fn create(pool: &SqlitePool, list: &List) -> RepoResult<()> {
    let contact = serde_json::to_string(&list.contact)?;
    let campaign_defaults = serde_json::to_string(&list.campaign_defaults)?;
    sqlx::query(
        "INSERT INTO lists (list_id, mail_chimp_id, name, contact, campaign_defaults, \
         email_type_option, permission_reminder, visibility, notify_on_subscribe, \
         notify_on_unsubscribe, use_archive_bar, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(list.list_id)
    .bind(&list.mail_chimp_id)
    .bind(&list.name)
    .bind(contact)
    .bind(campaign_defaults)
    .bind(list.email_type_option)
    .bind(&list.permission_reminder)
    .bind(&list.visibility)
    .bind(&list.notify_on_subscribe)
    .bind(&list.notify_on_unsubscribe)
    .bind(list.use_archive_bar)
    .bind(list.created_at)
    .bind(list.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, list_id: i64) -> RepoResult<Option<List>> {
    let sql = format!("{} WHERE list_id = ?", LIST_SELECT);
    let row = sqlx::query_as::<_, ListRow>(&sql)
        .bind(list_id)
        .fetch_optional(pool)
        .await?;
    row.map(List::try_from).transpose()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<List>> {
    let sql = format!("{} ORDER BY created_at ASC", LIST_SELECT);
    let rows = sqlx::query_as::<_, ListRow>(&sql).fetch_all(pool).await?;
    rows.into_iter().map(List::try_from).collect()
}

pub async fn update(pool: &SqlitePool, list: &List) -> RepoResult<()> {
    let contact = serde_json::to_string(&list.contact)?;
    let campaign_defaults = serde_json::to_string(&list.campaign_defaults)?;
    let result = sqlx::query(
        "UPDATE lists SET mail_chimp_id = ?1, name = ?2, contact = ?3, \
         campaign_defaults = ?4, email_type_option = ?5, permission_reminder = ?6, \
         visibility = ?7, notify_on_subscribe = ?8, notify_on_unsubscribe = ?9, \
         use_archive_bar = ?10, updated_at = ?11 WHERE list_id = ?12",
    )
    .bind(&list.mail_chimp_id)
    .bind(&list.name)
    .bind(contact)
    .bind(campaign_defaults)
    .bind(list.email_type_option)
    .bind(&list.permission_reminder)
    .bind(&list.visibility)
    .bind(&list.notify_on_subscribe)
    .bind(&list.notify_on_unsubscribe)
    .bind(list.use_archive_bar)
    .bind(list.updated_at)
    .bind(list.list_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("List {}", list.list_id)));
    }
    Ok(())
}

/// Backfill the MailChimp id after a successful remote create
pub async fn set_mail_chimp_id(
    pool: &SqlitePool,
    list_id: i64,
    mail_chimp_id: &str,
) -> RepoResult<()> {
    sqlx::query("UPDATE lists SET mail_chimp_id = ?1 WHERE list_id = ?2")
        .bind(mail_chimp_id)
        .bind(list_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, list_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM lists WHERE list_id = ?")
        .bind(list_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
