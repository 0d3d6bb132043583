use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Canonical contact record produced from a lead-provider payload.
///
/// Every field is best-effort: anything the provider did not send stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub email_status: Option<String>,
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl Contact {
    /// Email address, if present and not blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn has_email(&self) -> bool {
        self.email().is_some()
    }

    /// "First Last" with missing parts left out.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of an email verification call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailVerification {
    /// Deliverability class, e.g. `deliverable`, `undeliverable`, `risky`.
    pub result: Option<String>,
    pub score: Option<i64>,
    pub smtp_check: Option<bool>,
}

/// A contact with its verification outcome merged in under fixed keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VerifiedContact {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(rename = "hunter_result")]
    pub verification_result: Option<String>,
    #[serde(rename = "hunter_score")]
    pub verification_score: Option<i64>,
    pub smtp_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_error: Option<String>,
}

impl VerifiedContact {
    pub fn verified(contact: Contact, verification: EmailVerification) -> Self {
        Self {
            contact,
            verification_result: verification.result,
            verification_score: verification.score,
            smtp_check: verification.smtp_check,
            verification_error: None,
        }
    }

    pub fn failed(contact: Contact, error: impl Into<String>) -> Self {
        Self {
            contact,
            verification_result: None,
            verification_score: None,
            smtp_check: None,
            verification_error: Some(error.into()),
        }
    }

    /// Wraps a contact that was never sent for verification.
    pub fn unverified(contact: Contact) -> Self {
        Self {
            contact,
            verification_result: None,
            verification_score: None,
            smtp_check: None,
            verification_error: None,
        }
    }

    pub fn is_deliverable(&self) -> bool {
        self.verification_result.as_deref() == Some("deliverable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_ignores_blank() {
        let contact = Contact {
            email: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!contact.has_email());

        let contact = Contact {
            email: Some(" ada@example.com ".to_string()),
            ..Default::default()
        };
        assert_eq!(contact.email(), Some("ada@example.com"));
    }

    #[test]
    fn test_display_name() {
        let contact = Contact {
            first_name: Some("Ada".to_string()),
            last_name: None,
            ..Default::default()
        };
        assert_eq!(contact.display_name(), "Ada");
        assert_eq!(Contact::default().display_name(), "");
    }

    #[test]
    fn test_verified_contact_uses_fixed_keys() {
        let contact = Contact {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        let verified = VerifiedContact::verified(
            contact,
            EmailVerification {
                result: Some("deliverable".to_string()),
                score: Some(91),
                smtp_check: Some(true),
            },
        );

        let json = serde_json::to_value(&verified).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["hunter_result"], "deliverable");
        assert_eq!(json["hunter_score"], 91);
        assert_eq!(json["smtp_check"], true);
        assert!(json.get("verification_error").is_none());
        assert!(verified.is_deliverable());
    }
}
