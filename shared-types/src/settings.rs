use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Configuration state of one provider key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ApiKeyConfig {
    pub name: String,
    pub key: Option<String>,
    pub is_configured: bool,
}

/// Current settings as reported to the dashboard
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct SettingsResponse {
    pub config_file_path: String,
    pub api_keys: Vec<ApiKeyConfig>,
}

/// Request to update provider keys; `None` leaves a key unchanged
#[derive(Debug, Default, Serialize, Deserialize, TS)]
pub struct UpdateApiKeysRequest {
    pub apollo_api_key: Option<String>,
    pub hunter_api_key: Option<String>,
    pub hubspot_access_token: Option<String>,
}
