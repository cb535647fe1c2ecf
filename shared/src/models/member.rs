//! Member Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subscription states accepted by MailChimp
pub const MEMBER_STATUSES: [&str; 4] = ["subscribed", "unsubscribed", "cleaned", "pending"];

/// Check a status string against the enumerated subscription states
pub fn is_valid_status(status: &str) -> bool {
    MEMBER_STATUSES.contains(&status)
}

/// Optional geolocation pair, stored as a serialized blob
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberLocation {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Member entity — the local mirror of a MailChimp list member
///
/// `member_id` is the server-generated key; `mail_chimp_id`, `email_id`,
/// `unique_email_id` and `member_rating` are backfilled from MailChimp
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub member_id: i64,
    pub list_id: i64,
    pub mail_chimp_id: Option<String>,
    pub email_address: String,
    pub status: String,
    pub language: Option<String>,
    pub vip: Option<bool>,
    pub location: Option<MemberLocation>,
    pub ip_signup: Option<String>,
    pub tags: Option<Vec<String>>,
    pub email_id: Option<String>,
    pub unique_email_id: Option<String>,
    pub member_rating: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
///
/// `list_id` may ride in the body; the handler defaults it from the path.
/// Required fields are `Option` so that missing values reach schema
/// validation instead of failing body deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberCreate {
    pub list_id: Option<i64>,
    pub email_address: Option<String>,
    pub status: Option<String>,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_bool_coerce")]
    pub vip: Option<bool>,
    pub location: Option<MemberLocation>,
    pub ip_signup: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Update member payload — provided fields overwrite, absent fields keep
///
/// `email_address` is accepted only so the service can reject a changed
/// address; it never overwrites the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberUpdate {
    pub email_address: Option<String>,
    pub status: Option<String>,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_bool_coerce")]
    pub vip: Option<bool>,
    pub location: Option<MemberLocation>,
    pub ip_signup: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Trim + lower-case an email address for comparisons; duplicate and
/// quota checks are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl MemberCreate {
    /// Build the entity; absent required fields default to empty values
    /// that schema validation then reports field by field
    pub fn to_member(&self, member_id: i64, list_id: i64, now: i64) -> Member {
        Member {
            member_id,
            list_id,
            mail_chimp_id: None,
            email_address: self.email_address.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
            language: self.language.clone(),
            vip: self.vip,
            location: self.location.clone(),
            ip_signup: self.ip_signup.clone(),
            tags: self.tags.clone(),
            email_id: None,
            unique_email_id: None,
            member_rating: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Member {
    /// Merge an update payload into the entity; absent fields are kept,
    /// the email address is never touched
    pub fn apply_update(&mut self, update: &MemberUpdate) {
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        if let Some(language) = &update.language {
            self.language = Some(language.clone());
        }
        if let Some(vip) = update.vip {
            self.vip = Some(vip);
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(ip) = &update.ip_signup {
            self.ip_signup = Some(ip.clone());
        }
        if let Some(tags) = &update.tags {
            self.tags = Some(tags.clone());
        }
    }

    /// The member-resource body sent to MailChimp (local ids excluded)
    pub fn to_mailchimp_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(
            "email_address".into(),
            Value::String(self.email_address.clone()),
        );
        body.insert("status".into(), Value::String(self.status.clone()));
        if let Some(language) = &self.language {
            body.insert("language".into(), Value::String(language.clone()));
        }
        if let Some(vip) = self.vip {
            body.insert("vip".into(), Value::Bool(vip));
        }
        if let Some(location) = &self.location {
            body.insert(
                "location".into(),
                serde_json::to_value(location).unwrap_or_default(),
            );
        }
        if let Some(ip) = &self.ip_signup {
            body.insert("ip_signup".into(), Value::String(ip.clone()));
        }
        if let Some(tags) = &self.tags {
            body.insert(
                "tags".into(),
                Value::Array(tags.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(body)
    }
}
