use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Errors raised while validating a request, before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("API key is required")]
    MissingApiKey,
}

/// Paginated contact search against the lead provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_total_records")]
    pub total_records: usize,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub start_page: Option<u32>,
    #[serde(default)]
    pub q_keywords: String,
    #[serde(default)]
    pub person_titles: Option<Vec<String>>,
    #[serde(default)]
    pub organization_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub organization_locations: Option<Vec<String>>,
    #[serde(default)]
    pub organization_num_employees_ranges: Option<Vec<String>>,
}

fn default_total_records() -> usize {
    1
}

impl SearchRequest {
    pub fn new(api_key: impl Into<String>, q_keywords: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            total_records: default_total_records(),
            per_page: None,
            start_page: None,
            q_keywords: q_keywords.into(),
            person_titles: None,
            organization_keywords: None,
            organization_locations: None,
            organization_num_employees_ranges: None,
        }
    }

    pub fn with_total(mut self, total_records: usize) -> Self {
        self.total_records = total_records;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = Some(start_page);
        self
    }

    /// Page size actually sent; never below 1.
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.unwrap_or(1).max(1)
    }

    /// First page actually requested; pages are 1-based.
    pub fn effective_start_page(&self) -> u32 {
        self.start_page.unwrap_or(1).max(1)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.api_key.trim().is_empty() {
            return Err(RequestError::MissingApiKey);
        }
        Ok(())
    }
}

/// A search filter as users tend to supply it: a comma-separated string,
/// a list of values, or a list mixing values and nested lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum FilterParam {
    Text(String),
    List(Vec<FilterValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for FilterParam {
    fn from(value: &str) -> Self {
        FilterParam::Text(value.to_string())
    }
}

impl From<Vec<String>> for FilterParam {
    fn from(values: Vec<String>) -> Self {
        FilterParam::List(values.into_iter().map(FilterValue::One).collect())
    }
}

impl From<Vec<&str>> for FilterParam {
    fn from(values: Vec<&str>) -> Self {
        FilterParam::List(
            values
                .into_iter()
                .map(|v| FilterValue::One(v.to_string()))
                .collect(),
        )
    }
}

/// Single-page organization search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrganizationSearchRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub keywords: Option<FilterParam>,
    #[serde(default)]
    pub locations: Option<FilterParam>,
    #[serde(default)]
    pub industries: Option<FilterParam>,
    #[serde(default)]
    pub company_sizes: Option<FilterParam>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl OrganizationSearchRequest {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            keywords: None,
            locations: None,
            industries: None,
            company_sizes: None,
            limit: default_limit(),
        }
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.max(1)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.api_key.trim().is_empty() {
            return Err(RequestError::MissingApiKey);
        }
        Ok(())
    }
}
