//! Apollo lead provider: paginated contact search, single-page organization
//! search, and top people at an organization.

use super::{build_http_client, parse_json, read_body, trim_base_url};
use crate::config::{ApiConfig, DEFAULT_APOLLO_BASE_URL};
use crate::error::{Endpoint, Provider, ProviderError, Result};
use crate::jobs::fetcher::{fetch_paginated, fetch_paginated_partial, PageSource, PartialFetch};
use async_trait::async_trait;
use normalizers::{flatten_filter, normalize_contact, normalize_organization, normalize_person};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use shared_types::{Contact, Organization, OrganizationSearchRequest, SearchRequest};
use std::time::Duration;

const CONTACTS_SEARCH_PATH: &str = "/api/v1/contacts/search";
const ORGANIZATIONS_SEARCH_PATH: &str = "/api/v1/organizations/search";
const TOP_PEOPLE_PATH: &str = "/api/v1/mixed_people/organization_top_people";

const TOP_PEOPLE_PER_PAGE: u32 = 25;

#[derive(Serialize)]
struct ContactSearchPayload<'a> {
    page: u32,
    per_page: u32,
    q_keywords: &'a str,
    person_titles: &'a Option<Vec<String>>,
    organization_keywords: &'a Option<Vec<String>>,
    organization_locations: &'a Option<Vec<String>>,
    organization_num_employees_ranges: &'a Option<Vec<String>>,
    contact_email_status: &'static str,
}

#[derive(Serialize)]
struct OrganizationSearchPayload {
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    q_organization_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q_organization_locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q_organization_industries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q_organization_num_employees_ranges: Option<Vec<String>>,
}

#[derive(Serialize)]
struct TopPeoplePayload<'a> {
    organization_id: &'a str,
    page: u32,
    per_page: u32,
}

#[derive(Clone)]
pub struct ApolloClient {
    client: Client,
    base_url: String,
}

impl ApolloClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_APOLLO_BASE_URL, None)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(Provider::Apollo, timeout)?,
            base_url: trim_base_url(base_url),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_base_url(config.endpoints.apollo_base_url.clone(), config.http.timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One raw page of verified-email contacts.
    #[tracing::instrument(level = "debug", skip(self, request))]
    pub async fn search_contacts_page(
        &self,
        request: &SearchRequest,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let payload = ContactSearchPayload {
            page,
            per_page,
            q_keywords: &request.q_keywords,
            person_titles: &request.person_titles,
            organization_keywords: &request.organization_keywords,
            organization_locations: &request.organization_locations,
            organization_num_employees_ranges: &request.organization_num_employees_ranges,
            contact_email_status: "verified",
        };

        let response = self
            .client
            .post(self.url(CONTACTS_SEARCH_PATH))
            .bearer_auth(request.api_key.trim())
            .header("Cache-Control", "no-cache")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Apollo, &e))?;

        let body = read_body(Provider::Apollo, Endpoint::Search, response, |s| s.is_success()).await?;
        let json = parse_json(Provider::Apollo, &body)?;
        Ok(records(&json, "contacts"))
    }

    /// Up to `request.total_records` contacts. A failed page discards the
    /// contacts gathered so far.
    pub async fn fetch_contacts(&self, request: &SearchRequest) -> Result<Vec<Contact>> {
        request.validate()?;
        tracing::info!(
            "Fetching {} contacts from Apollo (per_page={}, start_page={})",
            request.total_records,
            request.effective_per_page(),
            request.effective_start_page()
        );

        let source = ContactSearch {
            client: self,
            request,
        };
        let contacts = fetch_paginated(
            &source,
            request.effective_start_page(),
            request.effective_per_page(),
            request.total_records,
            normalize_contact,
        )
        .await?;

        tracing::info!("Fetched {} contacts from Apollo", contacts.len());
        Ok(contacts)
    }

    /// Like [`fetch_contacts`](Self::fetch_contacts), but keeps the contacts
    /// from pages that succeeded before a failure.
    pub async fn fetch_contacts_partial(&self, request: &SearchRequest) -> PartialFetch<Contact> {
        if let Err(err) = request.validate() {
            return PartialFetch {
                records: Vec::new(),
                pages_fetched: 0,
                failure: Some(err.into()),
            };
        }

        let source = ContactSearch {
            client: self,
            request,
        };
        fetch_paginated_partial(
            &source,
            request.effective_start_page(),
            request.effective_per_page(),
            request.total_records,
            normalize_contact,
        )
        .await
    }

    /// A single page of organizations. An empty result is reported as
    /// [`ProviderError::NotFound`].
    #[tracing::instrument(level = "debug", skip(self, request), fields(limit = request.limit))]
    pub async fn search_organizations(
        &self,
        request: &OrganizationSearchRequest,
    ) -> Result<Vec<Organization>> {
        request.validate()?;

        let payload = OrganizationSearchPayload {
            page: 1,
            per_page: request.effective_limit(),
            q_organization_keywords: request.keywords.as_ref().and_then(flatten_filter),
            q_organization_locations: request.locations.as_ref().and_then(flatten_filter),
            q_organization_industries: request.industries.as_ref().and_then(flatten_filter),
            q_organization_num_employees_ranges: request
                .company_sizes
                .as_ref()
                .and_then(flatten_filter),
        };

        let response = self
            .client
            .post(self.url(ORGANIZATIONS_SEARCH_PATH))
            .header("X-Api-Key", request.api_key.trim())
            .header("Cache-Control", "no-cache")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Apollo, &e))?;

        let body = read_body(Provider::Apollo, Endpoint::Search, response, |s| s.is_success()).await?;
        let json = parse_json(Provider::Apollo, &body)?;

        let organizations: Vec<Organization> = records(&json, "organizations")
            .iter()
            .map(normalize_organization)
            .collect();

        if organizations.is_empty() {
            return Err(ProviderError::NotFound(
                "No organizations found. Try broader search terms.".to_string(),
            ));
        }

        tracing::info!("Apollo returned {} organizations", organizations.len());
        Ok(organizations)
    }

    /// First page of senior people at an organization, with LinkedIn URLs.
    #[tracing::instrument(level = "debug", skip(self, api_key))]
    pub async fn organization_top_people(
        &self,
        api_key: &str,
        organization_id: &str,
    ) -> Result<Vec<Contact>> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Validation("API key is required".to_string()));
        }
        if organization_id.trim().is_empty() {
            return Err(ProviderError::Validation(
                "Organization id is required".to_string(),
            ));
        }

        let payload = TopPeoplePayload {
            organization_id: organization_id.trim(),
            page: 1,
            per_page: TOP_PEOPLE_PER_PAGE,
        };

        let response = self
            .client
            .post(self.url(TOP_PEOPLE_PATH))
            .header("X-Api-Key", api_key.trim())
            .header("Cache-Control", "no-cache")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(Provider::Apollo, &e))?;

        let body = read_body(Provider::Apollo, Endpoint::Search, response, |s| s.is_success()).await?;
        let json = parse_json(Provider::Apollo, &body)?;

        Ok(records(&json, "people").iter().map(normalize_person).collect())
    }
}

/// Array under `key`; a missing or non-array value reads as no records.
fn records(json: &Value, key: &str) -> Vec<Value> {
    json.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

struct ContactSearch<'a> {
    client: &'a ApolloClient,
    request: &'a SearchRequest,
}

#[async_trait]
impl PageSource for ContactSearch<'_> {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Value>> {
        self.client
            .search_contacts_page(self.request, page, per_page)
            .await
    }
}
