use crate::config::ApiConfig;
use crate::error::Result;
use crate::integrations::{ApolloClient, HubspotClient, HunterClient};
use shared_types::{Contact, PipelineReport, SearchRequest, VerifiedContact};

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub verify: bool,
    pub push: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            verify: true,
            push: true,
        }
    }
}

/// Fetch contacts, verify their emails, push them to the CRM.
pub struct LeadPipeline {
    apollo: ApolloClient,
    hunter: HunterClient,
    hubspot: HubspotClient,
}

impl LeadPipeline {
    pub fn new(apollo: ApolloClient, hunter: HunterClient, hubspot: HubspotClient) -> Self {
        Self {
            apollo,
            hunter,
            hubspot,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(
            ApolloClient::from_config(config)?,
            HunterClient::from_config(config)?,
            HubspotClient::from_config(config)?,
        ))
    }

    /// Only a failed fetch aborts the run. Verification and push failures
    /// are recorded per contact in the report.
    ///
    /// With verification enabled, contacts without an email are dropped; the
    /// verified list is what gets pushed. A stage whose key is missing is
    /// skipped.
    pub async fn fetch_verify_push(
        &self,
        request: &SearchRequest,
        hunter_api_key: Option<&str>,
        hubspot_token: Option<&str>,
        options: PipelineOptions,
    ) -> Result<PipelineReport> {
        let started_at = chrono::Utc::now().timestamp();

        let contacts = self.apollo.fetch_contacts(request).await?;

        let verified: Vec<VerifiedContact> = match hunter_api_key.filter(|_| options.verify) {
            Some(key) => self.hunter.verify_contacts(&contacts, key).await,
            None => {
                tracing::info!("Skipping email verification");
                contacts.into_iter().map(VerifiedContact::unverified).collect()
            }
        };

        let crm_results = match hubspot_token.filter(|_| options.push) {
            Some(token) => {
                let to_push: Vec<Contact> = verified.iter().map(|v| v.contact.clone()).collect();
                self.hubspot.push_contacts(&to_push, token).await
            }
            None => {
                tracing::info!("Skipping HubSpot push");
                Vec::new()
            }
        };

        Ok(PipelineReport {
            total: verified.len(),
            contacts: verified,
            crm_results,
            started_at,
            completed_at: chrono::Utc::now().timestamp(),
        })
    }
}
