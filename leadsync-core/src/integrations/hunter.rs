use super::{build_http_client, parse_json, read_body, trim_base_url};
use crate::config::{ApiConfig, DEFAULT_HUNTER_BASE_URL};
use crate::error::{Endpoint, Provider, ProviderError, Result};
use crate::jobs::fan_out::fan_out;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared_types::{Contact, EmailVerification, VerifiedContact};
use std::time::Duration;

const EMAIL_VERIFIER_PATH: &str = "/v2/email-verifier";

/// Email deliverability checks against Hunter.
#[derive(Clone)]
pub struct HunterClient {
    client: Client,
    base_url: String,
}

impl HunterClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_HUNTER_BASE_URL, None)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(Provider::Hunter, timeout)?,
            base_url: trim_base_url(base_url),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_base_url(config.endpoints.hunter_base_url.clone(), config.http.timeout())
    }

    #[tracing::instrument(level = "debug", skip(self, api_key))]
    pub async fn verify_email(&self, email: &str, api_key: &str) -> Result<EmailVerification> {
        if email.trim().is_empty() {
            return Err(ProviderError::Validation("Email is required".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(ProviderError::Validation("API key is required".to_string()));
        }

        let response = self
            .client
            .get(format!("{}{}", self.base_url, EMAIL_VERIFIER_PATH))
            .query(&[("email", email.trim()), ("api_key", api_key.trim())])
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Hunter, &e))?;

        let body = read_body(Provider::Hunter, Endpoint::Search, response, |s| s == StatusCode::OK).await?;
        let json = parse_json(Provider::Hunter, &body)?;

        Ok(parse_verification(&json))
    }

    /// Verifies every contact that has an email, concurrently and in input
    /// order. Contacts without an email are dropped from the output; a failed
    /// verification keeps the contact and records the error on it.
    pub async fn verify_contacts(&self, contacts: &[Contact], api_key: &str) -> Vec<VerifiedContact> {
        let verified = fan_out(contacts, Contact::has_email, move |contact| async move {
            let email = contact.email().unwrap_or_default();
            match self.verify_email(email, api_key).await {
                Ok(verification) => VerifiedContact::verified(contact.clone(), verification),
                Err(err) => {
                    tracing::warn!("Verification failed for {}: {}", email, err);
                    VerifiedContact::failed(contact.clone(), err.detail())
                }
            }
        })
        .await;

        let failed = verified
            .iter()
            .filter(|c| c.verification_error.is_some())
            .count();
        tracing::info!(
            "Verified {} of {} contacts with Hunter ({} failed)",
            verified.len() - failed,
            contacts.len(),
            failed
        );
        verified
    }
}

/// Reads the `data` object. Scores arrive as integers but are accepted as
/// floats too.
fn parse_verification(json: &Value) -> EmailVerification {
    let data = json.get("data").unwrap_or(&Value::Null);
    EmailVerification {
        result: data
            .get("result")
            .or_else(|| data.get("status"))
            .and_then(Value::as_str)
            .map(str::to_string),
        score: data
            .get("score")
            .and_then(|s| s.as_i64().or_else(|| s.as_f64().map(|f| f.round() as i64))),
        smtp_check: data.get("smtp_check").and_then(Value::as_bool),
    }
}
