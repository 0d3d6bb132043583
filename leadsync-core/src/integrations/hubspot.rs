//! HubSpot CRM pushes.
//!
//! Every push returns a [`PushResult`] rather than an error: a batch keeps
//! going when individual records fail, and each failure carries the typed
//! [`PushErrorKind`](shared_types::PushErrorKind) plus the record it belongs to.

use super::{build_http_client, read_body, trim_base_url};
use crate::config::{ApiConfig, DEFAULT_HUBSPOT_BASE_URL};
use crate::error::{preview, Endpoint, Provider, ProviderError, Result};
use crate::jobs::fan_out::fan_out;
use normalizers::{company_properties, contact_properties, CrmProperties};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use shared_types::{Contact, Organization, PushFailure, PushResult, PushSummary};
use std::time::Duration;

const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";
const COMPANIES_PATH: &str = "/crm/v3/objects/companies";
const CONTACT_COMPANY_ASSOCIATION_PATH: &str = "/crm/v4/associations/contacts/companies/batch/create";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures listed individually in a batch summary log.
const LOGGED_FAILURES: usize = 3;

const MISSING_ID_WARNING: &str = "Created but HubSpot returned no record id";

fn is_created(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

fn is_associated(status: StatusCode) -> bool {
    is_created(status) || status == StatusCode::MULTI_STATUS
}

#[derive(Clone)]
pub struct HubspotClient {
    client: Client,
    base_url: String,
}

impl HubspotClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_HUBSPOT_BASE_URL, None)
    }

    /// Without an explicit timeout, requests give up after 30 seconds.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(Provider::Hubspot, Some(timeout.unwrap_or(DEFAULT_TIMEOUT)))?,
            base_url: trim_base_url(base_url),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_base_url(config.endpoints.hubspot_base_url.clone(), config.http.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates one CRM object. A 200/201 is a creation even when the body
    /// is unreadable or carries no id; that case yields `Ok(None)`.
    async fn create_object(
        &self,
        path: &str,
        properties: &CrmProperties,
        token: &str,
    ) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(token.trim())
            .json(&json!({ "properties": properties }))
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Hubspot, &e))?;

        let body = read_body(Provider::Hubspot, Endpoint::Push, response, is_created).await?;
        let Ok(json) = serde_json::from_str::<Value>(&body) else {
            tracing::debug!("Unreadable creation response: {}", preview(&body));
            return Ok(None);
        };

        Ok(match json.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
    }

    async fn associate_contact_with_company(
        &self,
        contact_id: &str,
        company_id: &str,
        token: &str,
    ) -> Result<()> {
        let payload = json!({
            "inputs": [{
                "from": { "id": contact_id },
                "to": { "id": company_id },
                "type": "contact_to_company"
            }]
        });

        let response = self
            .client
            .post(self.url(CONTACT_COMPANY_ASSOCIATION_PATH))
            .bearer_auth(token.trim())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Hubspot, &e))?;

        read_body(Provider::Hubspot, Endpoint::Push, response, is_associated).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(email = contact.email().unwrap_or_default()))]
    pub async fn push_contact(&self, contact: &Contact, token: &str) -> PushResult {
        let input = contact
            .email()
            .map(str::to_string)
            .unwrap_or_else(|| contact.display_name());

        if !contact.has_email() {
            return failed(ProviderError::Validation("Email is required".to_string()), input);
        }

        match self
            .create_object(CONTACTS_PATH, &contact_properties(contact), token)
            .await
        {
            Ok(Some(id)) => {
                tracing::debug!("Created HubSpot contact {} for {}", id, input);
                PushResult::created(id)
            }
            Ok(None) => {
                tracing::warn!("HubSpot contact for {} created without an id", input);
                created_without_id(MISSING_ID_WARNING)
            }
            Err(err) => {
                tracing::error!("Failed to push contact {}: {}", input, err);
                failed(err, input)
            }
        }
    }

    /// Pushes every contact that has an email; the rest are skipped without a
    /// call and have no entry in the output.
    pub async fn push_contacts(&self, contacts: &[Contact], token: &str) -> Vec<PushResult> {
        let results = fan_out(contacts, Contact::has_email, move |contact| {
            self.push_contact(contact, token)
        })
        .await;

        log_batch("contacts", contacts.len(), &results);
        results
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = organization.name().unwrap_or_default()))]
    pub async fn push_company(&self, organization: &Organization, token: &str) -> PushResult {
        let Some(name) = organization.name() else {
            return failed(
                ProviderError::Validation("Company name is required".to_string()),
                String::new(),
            );
        };

        match self
            .create_object(COMPANIES_PATH, &company_properties(organization), token)
            .await
        {
            Ok(Some(id)) => {
                tracing::info!("Created HubSpot company {} ({})", name, id);
                PushResult::created(id)
            }
            Ok(None) => {
                tracing::warn!("HubSpot company {} created without an id", name);
                created_without_id(MISSING_ID_WARNING)
            }
            Err(ProviderError::Duplicate(_)) => {
                let err = ProviderError::Duplicate(format!(
                    "Company '{}' already exists (duplicate by domain/name).",
                    name
                ));
                tracing::warn!("{}", err);
                failed(err, name.to_string())
            }
            Err(err) => {
                tracing::error!("Failed to push company {}: {}", name, err);
                failed(err, name.to_string())
            }
        }
    }

    /// Pushes every organization that has a name and logs a summary of the
    /// batch.
    pub async fn push_companies(&self, organizations: &[Organization], token: &str) -> Vec<PushResult> {
        let results = fan_out(organizations, Organization::has_name, move |organization| {
            self.push_company(organization, token)
        })
        .await;

        log_batch("companies", organizations.len(), &results);
        results
    }

    /// Creates a contact for `person` and, when `company_id` is given,
    /// associates it with that company. A failed association still counts as
    /// a created contact and is reported as a warning on it.
    #[tracing::instrument(level = "debug", skip_all, fields(company_id = company_id.unwrap_or_default()))]
    pub async fn push_person_to_company(
        &self,
        person: &Contact,
        company_id: Option<&str>,
        token: &str,
    ) -> PushResult {
        let input = person.display_name();

        if !person.has_email() {
            return failed(ProviderError::Validation("Email required".to_string()), input);
        }

        let created = match self
            .create_object(CONTACTS_PATH, &contact_properties(person), token)
            .await
        {
            Ok(created) => created,
            Err(err) => {
                tracing::error!("Failed to push person {}: {}", input, err);
                return failed(err, input);
            }
        };

        let company_id = company_id.map(str::trim).filter(|id| !id.is_empty());

        let contact_id = match (created, company_id) {
            (Some(contact_id), _) => contact_id,
            (None, None) => return created_without_id(MISSING_ID_WARNING),
            (None, Some(company_id)) => {
                tracing::warn!(
                    "Contact for {} created without an id, not associating with company {}",
                    input,
                    company_id
                );
                return created_without_id(
                    "Contact created but HubSpot returned no id; association skipped",
                );
            }
        };

        let Some(company_id) = company_id else {
            return PushResult::created(contact_id);
        };

        match self
            .associate_contact_with_company(&contact_id, company_id, token)
            .await
        {
            Ok(()) => {
                tracing::debug!("Associated contact {} with company {}", contact_id, company_id);
                PushResult::created(contact_id)
            }
            Err(err) => {
                tracing::warn!(
                    "Contact {} created but association with company {} failed: {}",
                    contact_id,
                    company_id,
                    err
                );
                PushResult::Created {
                    id: contact_id,
                    warning: Some(format!(
                        "Contact created but association failed: {}",
                        err.detail()
                    )),
                }
            }
        }
    }

    pub async fn push_people_to_company(
        &self,
        people: &[Contact],
        company_id: Option<&str>,
        token: &str,
    ) -> Vec<PushResult> {
        let results = fan_out(people, Contact::has_email, move |person| {
            self.push_person_to_company(person, company_id, token)
        })
        .await;

        log_batch("people", people.len(), &results);
        results
    }
}

fn created_without_id(warning: &str) -> PushResult {
    PushResult::Created {
        id: String::new(),
        warning: Some(warning.to_string()),
    }
}

fn failed(err: ProviderError, input: String) -> PushResult {
    PushResult::Failed(PushFailure {
        status: err.status(),
        kind: err.kind(),
        error: err.detail(),
        input,
    })
}

fn log_batch(kind: &str, submitted: usize, results: &[PushResult]) {
    if results.is_empty() {
        tracing::info!("No {} to push to HubSpot ({} skipped)", kind, submitted);
        return;
    }

    let summary = PushSummary::from_results(results);
    tracing::info!(
        submitted,
        dispatched = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        warnings = summary.with_warnings,
        "HubSpot {} push finished",
        kind
    );

    for failure in results
        .iter()
        .filter_map(PushResult::failure)
        .take(LOGGED_FAILURES)
    {
        tracing::warn!(
            "  {} [{}]: {}",
            failure.input,
            failure.status,
            preview(&failure.error)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PushErrorKind;

    #[test]
    fn test_failed_descriptor() {
        let result = failed(
            ProviderError::RateLimited {
                provider: Provider::Hubspot,
            },
            "a@b.com".to_string(),
        );

        let failure = result.failure().unwrap();
        assert_eq!(failure.status, 429);
        assert_eq!(failure.kind, PushErrorKind::RateLimited);
        assert_eq!(failure.input, "a@b.com");
        assert_eq!(failure.error, "HubSpot rate limit exceeded. Try again later.");
    }

    #[test]
    fn test_accepted_statuses() {
        assert!(is_created(StatusCode::CREATED));
        assert!(!is_created(StatusCode::ACCEPTED));
        assert!(!is_created(StatusCode::MULTI_STATUS));
        assert!(is_associated(StatusCode::MULTI_STATUS));
    }

    #[tokio::test]
    async fn test_validation_needs_no_network() {
        let client = HubspotClient::with_base_url("http://127.0.0.1:9", None).unwrap();

        let result = client.push_contact(&Contact::default(), "token").await;
        assert_eq!(result.failure().map(|f| f.kind), Some(PushErrorKind::Validation));

        let result = client.push_company(&Organization::default(), "token").await;
        assert_eq!(result.failure().map(|f| f.status), Some(400));

        let person = Contact {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        let result = client.push_person_to_company(&person, Some("1"), "token").await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.error, "Email required");
        assert_eq!(failure.input, "Ada");
    }

    #[tokio::test]
    async fn test_empty_batches() {
        let client = HubspotClient::with_base_url("http://127.0.0.1:9", None).unwrap();

        assert!(client.push_contacts(&[], "token").await.is_empty());
        assert!(client.push_companies(&[], "token").await.is_empty());
        assert!(client
            .push_people_to_company(&[Contact::default()], Some("1"), "token")
            .await
            .is_empty());
    }
}
