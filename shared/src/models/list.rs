//! List Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List contact block, stored as a serialized blob and forwarded to
/// MailChimp verbatim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListContact {
    pub company: Option<String>,
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Campaign defaults block, stored as a serialized blob
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignDefaults {
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub subject: Option<String>,
    pub language: Option<String>,
}

/// List entity — the local mirror of a MailChimp list
///
/// `list_id` is the server-generated key; `mail_chimp_id` stays `None`
/// until the first successful remote create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub list_id: i64,
    pub mail_chimp_id: Option<String>,
    pub name: String,
    pub contact: ListContact,
    pub campaign_defaults: CampaignDefaults,
    pub email_type_option: bool,
    pub permission_reminder: String,
    pub visibility: Option<String>,
    pub notify_on_subscribe: Option<String>,
    pub notify_on_unsubscribe: Option<String>,
    pub use_archive_bar: Option<bool>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create list payload
///
/// Required fields are `Option` so that missing values reach schema
/// validation (field-level errors) instead of failing body deserialization.
/// Unknown fields are rejected outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListCreate {
    pub name: Option<String>,
    pub contact: Option<ListContact>,
    pub campaign_defaults: Option<CampaignDefaults>,
    pub email_type_option: Option<bool>,
    pub permission_reminder: Option<String>,
    pub visibility: Option<String>,
    pub notify_on_subscribe: Option<String>,
    pub notify_on_unsubscribe: Option<String>,
    pub use_archive_bar: Option<bool>,
}

/// Update list payload — provided fields overwrite, absent fields keep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub contact: Option<ListContact>,
    pub campaign_defaults: Option<CampaignDefaults>,
    pub email_type_option: Option<bool>,
    pub permission_reminder: Option<String>,
    pub visibility: Option<String>,
    pub notify_on_subscribe: Option<String>,
    pub notify_on_unsubscribe: Option<String>,
    pub use_archive_bar: Option<bool>,
}

impl ListCreate {
    /// Build the entity; absent required fields default to empty values
    /// that schema validation then reports field by field
    pub fn to_list(&self, list_id: i64, now: i64) -> List {
        List {
            list_id,
            mail_chimp_id: None,
            name: self.name.clone().unwrap_or_default(),
            contact: self.contact.clone().unwrap_or_default(),
            campaign_defaults: self.campaign_defaults.clone().unwrap_or_default(),
            email_type_option: self.email_type_option.unwrap_or_default(),
            permission_reminder: self.permission_reminder.clone().unwrap_or_default(),
            visibility: self.visibility.clone(),
            notify_on_subscribe: self.notify_on_subscribe.clone(),
            notify_on_unsubscribe: self.notify_on_unsubscribe.clone(),
            use_archive_bar: self.use_archive_bar,
            created_at: now,
            updated_at: now,
        }
    }
}

impl List {
    /// Merge an update payload into the entity; absent fields are kept
    pub fn apply_update(&mut self, update: &ListUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(contact) = &update.contact {
            self.contact = contact.clone();
        }
        if let Some(defaults) = &update.campaign_defaults {
            self.campaign_defaults = defaults.clone();
        }
        if let Some(option) = update.email_type_option {
            self.email_type_option = option;
        }
        if let Some(reminder) = &update.permission_reminder {
            self.permission_reminder = reminder.clone();
        }
        if let Some(visibility) = &update.visibility {
            self.visibility = Some(visibility.clone());
        }
        if let Some(notify) = &update.notify_on_subscribe {
            self.notify_on_subscribe = Some(notify.clone());
        }
        if let Some(notify) = &update.notify_on_unsubscribe {
            self.notify_on_unsubscribe = Some(notify.clone());
        }
        if let Some(archive_bar) = update.use_archive_bar {
            self.use_archive_bar = Some(archive_bar);
        }
    }

    /// The list-resource body sent to MailChimp (local ids excluded)
    pub fn to_mailchimp_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), Value::String(self.name.clone()));
        body.insert(
            "contact".into(),
            serde_json::to_value(&self.contact).unwrap_or_default(),
        );
        body.insert(
            "campaign_defaults".into(),
            serde_json::to_value(&self.campaign_defaults).unwrap_or_default(),
        );
        body.insert(
            "email_type_option".into(),
            Value::Bool(self.email_type_option),
        );
        body.insert(
            "permission_reminder".into(),
            Value::String(self.permission_reminder.clone()),
        );
        if let Some(visibility) = &self.visibility {
            body.insert("visibility".into(), Value::String(visibility.clone()));
        }
        if let Some(notify) = &self.notify_on_subscribe {
            body.insert("notify_on_subscribe".into(), Value::String(notify.clone()));
        }
        if let Some(notify) = &self.notify_on_unsubscribe {
            body.insert(
                "notify_on_unsubscribe".into(),
                Value::String(notify.clone()),
            );
        }
        if let Some(archive_bar) = self.use_archive_bar {
            body.insert("use_archive_bar".into(), Value::Bool(archive_bar));
        }
        Value::Object(body)
    }
}
