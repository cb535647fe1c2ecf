//! Schema validation helpers
//!
//! Field checks mirror the MailChimp list/member resource contracts. Each
//! validator collects a field → message map; a non-empty map becomes a
//! single `Invalid data given` error carrying the map as details.

use serde_json::Value;
use shared::models::{List, ListCreate, Member, is_valid_status};
use shared::{AppError, AppResult};
use std::collections::HashMap;
use validator::{ValidateEmail, ValidateIp};

const VISIBILITIES: [&str; 2] = ["pub", "prv"];

fn finish(errors: HashMap<String, Value>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Invalid data given").with_details(errors))
    }
}

fn require(errors: &mut HashMap<String, Value>, field: &str, value: Option<&str>) {
    if value.is_none_or(|v| v.trim().is_empty()) {
        errors.insert(field.to_string(), format!("{field} is required").into());
    }
}

/// Validate a create payload against the MailChimp list schema
///
/// `email_type_option` requiredness is only visible on the payload (the
/// entity's bool has already been defaulted); the remaining checks run on
/// the built entity.
pub fn validate_list_create(payload: &ListCreate, list: &List) -> AppResult<()> {
    let mut errors: HashMap<String, Value> = HashMap::new();
    if payload.email_type_option.is_none() {
        errors.insert(
            "email_type_option".into(),
            "email_type_option is required".into(),
        );
    }
    collect_list_errors(list, &mut errors);
    finish(errors)
}

/// Validate a list entity against the MailChimp list schema
pub fn validate_list(list: &List) -> AppResult<()> {
    let mut errors: HashMap<String, Value> = HashMap::new();
    collect_list_errors(list, &mut errors);
    finish(errors)
}

fn collect_list_errors(list: &List, errors: &mut HashMap<String, Value>) {
    require(errors, "name", Some(&list.name));
    require(
        errors,
        "permission_reminder",
        Some(&list.permission_reminder),
    );

    require(errors, "contact.company", list.contact.company.as_deref());
    require(
        errors,
        "contact.address1",
        list.contact.address1.as_deref(),
    );
    require(errors, "contact.city", list.contact.city.as_deref());
    require(errors, "contact.state", list.contact.state.as_deref());
    require(errors, "contact.zip", list.contact.zip.as_deref());
    require(errors, "contact.country", list.contact.country.as_deref());

    let defaults = &list.campaign_defaults;
    require(
        errors,
        "campaign_defaults.from_name",
        defaults.from_name.as_deref(),
    );
    require(
        errors,
        "campaign_defaults.from_email",
        defaults.from_email.as_deref(),
    );
    require(
        errors,
        "campaign_defaults.subject",
        defaults.subject.as_deref(),
    );
    require(
        errors,
        "campaign_defaults.language",
        defaults.language.as_deref(),
    );
    if let Some(from_email) = defaults.from_email.as_deref()
        && !from_email.trim().is_empty()
        && !from_email.validate_email()
    {
        errors.insert(
            "campaign_defaults.from_email".into(),
            "campaign_defaults.from_email must be a valid email address".into(),
        );
    }

    if let Some(visibility) = list.visibility.as_deref()
        && !VISIBILITIES.contains(&visibility)
    {
        errors.insert(
            "visibility".into(),
            format!("visibility must be one of: {}", VISIBILITIES.join(", ")).into(),
        );
    }

    for (field, value) in [
        ("notify_on_subscribe", &list.notify_on_subscribe),
        ("notify_on_unsubscribe", &list.notify_on_unsubscribe),
    ] {
        if let Some(email) = value.as_deref()
            && !email.is_empty()
            && !email.validate_email()
        {
            errors.insert(
                field.into(),
                format!("{field} must be a valid email address").into(),
            );
        }
    }
}

/// Validate a member entity against the MailChimp member schema
pub fn validate_member(member: &Member) -> AppResult<()> {
    let mut errors: HashMap<String, Value> = HashMap::new();

    let email = member.email_address.trim();
    if email.is_empty() {
        errors.insert(
            "email_address".into(),
            "email_address is required".into(),
        );
    } else if !email.validate_email() {
        errors.insert(
            "email_address".into(),
            "email_address must be a valid email address".into(),
        );
    }

    if member.status.trim().is_empty() {
        errors.insert("status".into(), "status is required".into());
    } else if !is_valid_status(&member.status) {
        errors.insert(
            "status".into(),
            format!("Invalid status given: {}", member.status).into(),
        );
    }

    if let Some(ip) = member.ip_signup.as_deref()
        && !ip.is_empty()
        && !ip.validate_ip()
    {
        errors.insert(
            "ip_signup".into(),
            "ip_signup must be a valid IP address".into(),
        );
    }

    finish(errors)
}
