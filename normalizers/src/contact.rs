use serde_json::Value;
use shared_types::Contact;

use crate::value::{as_text, text};

/// Normalizes one contact-search record.
///
/// Direct keys win; nested alternates are only consulted when the direct key
/// is missing or blank. Never fails: an input with no recognised keys (or one
/// that is not even an object) yields a `Contact` with every field unset.
pub fn normalize_contact(raw: &Value) -> Contact {
    Contact {
        id: text(raw, "id"),
        first_name: text(raw, "first_name"),
        last_name: text(raw, "last_name"),
        title: text(raw, "title"),
        email: text(raw, "email"),
        phone: phone(raw),
        email_status: text(raw, "email_status").or_else(|| text(raw, "contact_email_status")),
        organization: organization_name(raw),
        linkedin_url: None,
    }
}

/// Normalizes one organization top-people record. Same resolution rules as
/// [`normalize_contact`], plus the profile URL.
pub fn normalize_person(raw: &Value) -> Contact {
    Contact {
        linkedin_url: text(raw, "linkedin_url"),
        ..normalize_contact(raw)
    }
}

// phone -> phones[0].number | phones[0].phone -> account.phone | account.sanitized_phone
fn phone(raw: &Value) -> Option<String> {
    text(raw, "phone")
        .or_else(|| {
            let first = raw.get("phones")?.as_array()?.first()?;
            text(first, "number").or_else(|| text(first, "phone"))
        })
        .or_else(|| {
            let account = raw.get("account")?;
            text(account, "phone").or_else(|| text(account, "sanitized_phone"))
        })
}

// organization (string or object name) -> organization_name -> account.name
fn organization_name(raw: &Value) -> Option<String> {
    raw.get("organization")
        .and_then(|org| as_text(org).or_else(|| text(org, "name")))
        .or_else(|| text(raw, "organization_name"))
        .or_else(|| raw.get("account").and_then(|account| text(account, "name")))
}
