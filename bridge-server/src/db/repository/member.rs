//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberLocation};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT member_id, list_id, mail_chimp_id, email_address, status, \
     language, vip, location, ip_signup, tags, email_id, unique_email_id, member_rating, \
     created_at, updated_at FROM members";

/// Raw row with JSON TEXT columns still serialized
#[derive(sqlx::FromRow)]
struct MemberRow {
    member_id: i64,
    list_id: i64,
    mail_chimp_id: Option<String>,
    email_address: String,
    status: String,
    language: Option<String>,
    vip: Option<bool>,
    location: Option<String>,
    ip_signup: Option<String>,
    tags: Option<String>,
    email_id: Option<String>,
    unique_email_id: Option<String>,
    member_rating: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepoError;

    fn try_from(row: MemberRow) -> RepoResult<Self> {
        let location: Option<MemberLocation> = row
            .location
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let tags: Option<Vec<String>> =
            row.tags.as_deref().map(serde_json::from_str).transpose()?;
        Ok(Member {
            member_id: row.member_id,
            list_id: row.list_id,
            mail_chimp_id: row.mail_chimp_id,
            email_address: row.email_address,
            status: row.status,
            language: row.language,
            vip: row.vip,
            location,
            ip_signup: row.ip_signup,
            tags,
            email_id: row.email_id,
            unique_email_id: row.unique_email_id,
            member_rating: row.member_rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn location_json(member: &Member) -> RepoResult<Option<String>> {
    member
        .location
        .as_ref()
        .map(|l| serde_json::to_string(l).map_err(RepoError::from))
        .transpose()
}

fn tags_json(member: &Member) -> RepoResult<Option<String>> {
    member
        .tags
        .as_ref()
        .map(|t| serde_json::to_string(t).map_err(RepoError::from))
        .transpose()
}

pub async fn create(pool: &SqlitePool, member: &Member) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO members (member_id, list_id, mail_chimp_id, email_address, status, \
         language, vip, location, ip_signup, tags, email_id, unique_email_id, member_rating, \
         created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )
    .bind(member.member_id)
    .bind(member.list_id)
    .bind(&member.mail_chimp_id)
    .bind(&member.email_address)
    .bind(&member.status)
    .bind(&member.language)
    .bind(member.vip)
    .bind(location_json(member)?)
    .bind(&member.ip_signup)
    .bind(tags_json(member)?)
    .bind(&member.email_id)
    .bind(&member.unique_email_id)
    .bind(member.member_rating)
    .bind(member.created_at)
    .bind(member.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_list(pool: &SqlitePool, list_id: i64) -> RepoResult<Vec<Member>> {
    let sql = format!("{} WHERE list_id = ? ORDER BY created_at ASC", MEMBER_SELECT);
    let rows = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(list_id)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Member::try_from).collect()
}

pub async fn find_by_list_and_id(
    pool: &SqlitePool,
    list_id: i64,
    member_id: i64,
) -> RepoResult<Option<Member>> {
    let sql = format!("{} WHERE list_id = ? AND member_id = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(list_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;
    row.map(Member::try_from).transpose()
}

/// Look a member up by list and normalized (trimmed, lower-cased) email
pub async fn find_by_list_and_email(
    pool: &SqlitePool,
    list_id: i64,
    normalized_email: &str,
) -> RepoResult<Option<Member>> {
    let sql = format!(
        "{} WHERE list_id = ? AND LOWER(TRIM(email_address)) = ? LIMIT 1",
        MEMBER_SELECT
    );
    let row = sqlx::query_as::<_, MemberRow>(&sql)
        .bind(list_id)
        .bind(normalized_email)
        .fetch_optional(pool)
        .await?;
    row.map(Member::try_from).transpose()
}

/// Count members sharing a normalized email across all lists (quota check)
pub async fn count_by_email(pool: &SqlitePool, normalized_email: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM members WHERE LOWER(TRIM(email_address)) = ?",
    )
    .bind(normalized_email)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn update(pool: &SqlitePool, member: &Member) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE members SET mail_chimp_id = ?1, email_address = ?2, status = ?3, \
         language = ?4, vip = ?5, location = ?6, ip_signup = ?7, tags = ?8, email_id = ?9, \
         unique_email_id = ?10, member_rating = ?11, updated_at = ?12 WHERE member_id = ?13",
    )
    .bind(&member.mail_chimp_id)
    .bind(&member.email_address)
    .bind(&member.status)
    .bind(&member.language)
    .bind(member.vip)
    .bind(location_json(member)?)
    .bind(&member.ip_signup)
    .bind(tags_json(member)?)
    .bind(&member.email_id)
    .bind(&member.unique_email_id)
    .bind(member.member_rating)
    .bind(member.updated_at)
    .bind(member.member_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {}", member.member_id)));
    }
    Ok(())
}

/// Backfill remote identifiers after a successful remote create
pub async fn set_remote_fields(pool: &SqlitePool, member: &Member) -> RepoResult<()> {
    sqlx::query(
        "UPDATE members SET mail_chimp_id = ?1, email_id = ?2, unique_email_id = ?3, \
         member_rating = ?4, updated_at = ?5 WHERE member_id = ?6",
    )
    .bind(&member.mail_chimp_id)
    .bind(&member.email_id)
    .bind(&member.unique_email_id)
    .bind(member.member_rating)
    .bind(member.updated_at)
    .bind(member.member_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, member_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM members WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
