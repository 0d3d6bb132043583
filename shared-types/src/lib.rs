pub mod contact;
pub mod organization;
pub mod pipeline;
pub mod push;
pub mod search;
pub mod settings;

pub use contact::{Contact, EmailVerification, VerifiedContact};
pub use organization::Organization;
pub use pipeline::PipelineReport;
pub use push::{PushErrorKind, PushFailure, PushResult, PushSummary};
pub use search::{FilterParam, FilterValue, OrganizationSearchRequest, RequestError, SearchRequest};
pub use settings::{ApiKeyConfig, SettingsResponse, UpdateApiKeysRequest};
