pub mod apollo;
pub mod hubspot;
pub mod hunter;

pub use apollo::ApolloClient;
pub use hubspot::HubspotClient;
pub use hunter::HunterClient;

use crate::error::{classify, Endpoint, Provider, ProviderError, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

pub(crate) fn build_http_client(provider: Provider, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ProviderError::transport(provider, &e))
}

/// Reads the body and sends anything outside `accept` through the classifier.
pub(crate) async fn read_body(
    provider: Provider,
    endpoint: Endpoint,
    response: Response,
    accept: impl Fn(StatusCode) -> bool,
) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::transport(provider, &e))?;

    if accept(status) {
        Ok(body)
    } else {
        Err(classify(provider, endpoint, status.as_u16(), &body))
    }
}

pub(crate) fn parse_json(provider: Provider, body: &str) -> Result<serde_json::Value> {
    serde_json::from_str(body).map_err(|e| ProviderError::decode(provider, e))
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
