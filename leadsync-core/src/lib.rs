pub mod config;
pub mod error;
pub mod integrations;
pub mod jobs;

pub use config::ApiConfig;
pub use error::{Endpoint, Provider, ProviderError, Result};
pub use integrations::{ApolloClient, HubspotClient, HunterClient};
pub use jobs::fetcher::{fetch_paginated, fetch_paginated_partial, PageSource, PartialFetch};
pub use jobs::pipeline::{LeadPipeline, PipelineOptions};
