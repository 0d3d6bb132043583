use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use shared_types::{ApiKeyConfig, SettingsResponse, UpdateApiKeysRequest};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_APOLLO_BASE_URL: &str = "https://api.apollo.io";
pub const DEFAULT_HUNTER_BASE_URL: &str = "https://api.hunter.io";
pub const DEFAULT_HUBSPOT_BASE_URL: &str = "https://api.hubapi.com";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub api_keys: Option<ApiKeysConfig>,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiKeysConfig {
    pub apollo_api_key: Option<String>,
    pub hunter_api_key: Option<String>,
    pub hubspot_access_token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_apollo_base_url")]
    pub apollo_base_url: String,
    #[serde(default = "default_hunter_base_url")]
    pub hunter_base_url: String,
    #[serde(default = "default_hubspot_base_url")]
    pub hubspot_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            apollo_base_url: default_apollo_base_url(),
            hunter_base_url: default_hunter_base_url(),
            hubspot_base_url: default_hubspot_base_url(),
        }
    }
}

fn default_apollo_base_url() -> String {
    DEFAULT_APOLLO_BASE_URL.to_string()
}

fn default_hunter_base_url() -> String {
    DEFAULT_HUNTER_BASE_URL.to_string()
}

fn default_hubspot_base_url() -> String {
    DEFAULT_HUBSPOT_BASE_URL.to_string()
}

/// Transport settings. Without `timeout_secs` each client keeps its own
/// default (none for Apollo and Hunter, 30 seconds for HubSpot).
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

const DEFAULT_CONFIG: &str = r#"
[api_keys]
# apollo_api_key = "your-apollo-key"
# hunter_api_key = "your-hunter-key"
# hubspot_access_token = "your-hubspot-private-app-token"

[endpoints]
apollo_base_url = "https://api.apollo.io"
hunter_base_url = "https://api.hunter.io"
hubspot_base_url = "https://api.hubapi.com"

[http]
# Applies to every provider when set
# timeout_secs = 30
"#;

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Loads the file at `config_path`, writing a commented default first if
    /// it does not exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
        std::fs::write(config_path, toml_string)
            .map_err(|e| anyhow::anyhow!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Merges new keys in; keys left as `None` keep their current value.
    pub fn update_api_keys(&mut self, request: UpdateApiKeysRequest) {
        let keys = self.api_keys.get_or_insert_with(ApiKeysConfig::default);
        if let Some(key) = request.apollo_api_key {
            keys.apollo_api_key = Some(key);
        }
        if let Some(key) = request.hunter_api_key {
            keys.hunter_api_key = Some(key);
        }
        if let Some(token) = request.hubspot_access_token {
            keys.hubspot_access_token = Some(token);
        }
    }

    pub fn apollo_api_key(&self) -> Option<&str> {
        self.api_keys
            .as_ref()
            .and_then(|keys| non_blank(&keys.apollo_api_key))
    }

    pub fn hunter_api_key(&self) -> Option<&str> {
        self.api_keys
            .as_ref()
            .and_then(|keys| non_blank(&keys.hunter_api_key))
    }

    pub fn hubspot_access_token(&self) -> Option<&str> {
        self.api_keys
            .as_ref()
            .and_then(|keys| non_blank(&keys.hubspot_access_token))
    }

    /// Masked view of every provider key, safe to log or display.
    pub fn api_key_status(&self) -> Vec<ApiKeyConfig> {
        [
            ("apollo", self.apollo_api_key()),
            ("hunter", self.hunter_api_key()),
            ("hubspot", self.hubspot_access_token()),
        ]
        .into_iter()
        .map(|(name, key)| ApiKeyConfig {
            name: name.to_string(),
            key: key.map(mask_api_key),
            is_configured: key.is_some(),
        })
        .collect()
    }

    pub fn settings_response(&self, config_path: &Path) -> SettingsResponse {
        SettingsResponse {
            config_file_path: config_path.display().to_string(),
            api_keys: self.api_key_status(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub fn mask_api_key(key: &str) -> String {
    let visible: String = key.chars().take(6).collect();
    let hidden = key.chars().count().saturating_sub(6);
    if hidden == 0 {
        return visible;
    }
    let masked = format!("{}{}", visible, "*".repeat(hidden));
    if masked.chars().count() > 40 {
        format!("{}...", masked.chars().take(37).collect::<String>())
    } else {
        masked
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("leadsync").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
