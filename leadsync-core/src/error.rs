//! Error classification for provider responses.
//!
//! Every non-2xx response from a provider goes through [`classify`], which maps
//! the status code (and, on push endpoints, a duplicate marker in the body) to
//! a typed [`ProviderError`]. Classified errors are terminal for the call that
//! produced them; nothing in this crate retries.

use shared_types::{PushErrorKind, RequestError};
use std::fmt;

/// Characters of a raw body shown in log lines and `Display` output.
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Apollo,
    Hunter,
    Hubspot,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Apollo => "Apollo",
            Provider::Hunter => "Hunter",
            Provider::Hubspot => "HubSpot",
        }
    }

    fn credentials_hint(&self) -> &'static str {
        match self {
            Provider::Apollo => "Unauthorized. Check your Apollo API key.",
            Provider::Hunter => "Unauthorized. Check your Hunter API key.",
            Provider::Hubspot => {
                "Invalid HubSpot API Key or token expired. Check Authorization scopes."
            }
        }
    }

    fn permission_hint(&self, detail: &str) -> String {
        match self {
            Provider::Apollo => "Forbidden. Check your Apollo subscription plan.".to_string(),
            Provider::Hunter => "Forbidden. Check your Hunter plan.".to_string(),
            Provider::Hubspot => format!("Missing required HubSpot permission (scope): {detail}"),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of the integration a response came from. 404 only means
/// "no results" on search endpoints; duplicates only exist on push endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Push,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Validation(String),

    #[error("{hint}")]
    InvalidCredentials { provider: Provider, hint: String },

    #[error("{detail}")]
    Forbidden { provider: Provider, detail: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{provider} rate limit exceeded. Try again later.")]
    RateLimited { provider: Provider },

    #[error("{provider} request failed: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} returned an unreadable response: {message}")]
    Decode { provider: Provider, message: String },

    #[error("{provider} error [{status}]: {}", preview(.body))]
    Unclassified {
        provider: Provider,
        status: u16,
        body: String,
    },
}

impl ProviderError {
    pub fn transport(provider: Provider, err: &reqwest::Error) -> Self {
        ProviderError::Transport {
            provider,
            message: err.to_string(),
        }
    }

    pub fn decode(provider: Provider, err: impl fmt::Display) -> Self {
        ProviderError::Decode {
            provider,
            message: err.to_string(),
        }
    }

    /// HTTP-style status for the error descriptor. Local failures use the
    /// codes a server would have sent (400 for validation, 500 for transport).
    pub fn status(&self) -> u16 {
        match self {
            ProviderError::Validation(_) => 400,
            ProviderError::InvalidCredentials { .. } => 401,
            ProviderError::Forbidden { .. } => 403,
            ProviderError::NotFound(_) => 404,
            ProviderError::Duplicate(_) => 409,
            ProviderError::RateLimited { .. } => 429,
            ProviderError::Transport { .. } => 500,
            ProviderError::Decode { .. } => 502,
            ProviderError::Unclassified { status, .. } => *status,
        }
    }

    pub fn kind(&self) -> PushErrorKind {
        match self {
            ProviderError::Validation(_) => PushErrorKind::Validation,
            ProviderError::InvalidCredentials { .. } => PushErrorKind::InvalidCredentials,
            ProviderError::Forbidden { .. } => PushErrorKind::Forbidden,
            ProviderError::NotFound(_) => PushErrorKind::NotFound,
            ProviderError::Duplicate(_) => PushErrorKind::Duplicate,
            ProviderError::RateLimited { .. } => PushErrorKind::RateLimited,
            ProviderError::Transport { .. } => PushErrorKind::Transport,
            ProviderError::Decode { .. } => PushErrorKind::Decode,
            ProviderError::Unclassified { .. } => PushErrorKind::Unclassified,
        }
    }

    /// Full message for structured output. Unlike `Display`, unclassified
    /// bodies are not truncated.
    pub fn detail(&self) -> String {
        match self {
            ProviderError::Unclassified { body, .. } => error_detail(body),
            other => other.to_string(),
        }
    }

    /// Whether a caller could reasonably try the same call again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. } | ProviderError::Transport { .. }
        )
    }
}

impl From<RequestError> for ProviderError {
    fn from(err: RequestError) -> Self {
        ProviderError::Validation(err.to_string())
    }
}

/// Maps a non-2xx response to a typed error.
pub fn classify(provider: Provider, endpoint: Endpoint, status: u16, body: &str) -> ProviderError {
    let detail = error_detail(body);

    match status {
        401 => ProviderError::InvalidCredentials {
            provider,
            hint: provider.credentials_hint().to_string(),
        },
        403 => ProviderError::Forbidden {
            provider,
            detail: provider.permission_hint(&detail),
        },
        404 if endpoint == Endpoint::Search => {
            ProviderError::NotFound(format!("{provider} returned no results."))
        }
        409 if endpoint == Endpoint::Push => ProviderError::Duplicate(detail),
        429 => ProviderError::RateLimited { provider },
        _ if endpoint == Endpoint::Push && detail.to_uppercase().contains("DUPLICATE") => {
            ProviderError::Duplicate(detail)
        }
        _ => ProviderError::Unclassified {
            provider,
            status,
            body: body.to_string(),
        },
    }
}

/// The `message` field of a JSON error body, or the raw text.
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// First [`PREVIEW_CHARS`] characters of `text`, for log lines.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors() {
        let err = classify(Provider::Apollo, Endpoint::Search, 401, "");
        assert_eq!(err.kind(), PushErrorKind::InvalidCredentials);
        assert_eq!(err.to_string(), "Unauthorized. Check your Apollo API key.");

        let err = classify(Provider::Apollo, Endpoint::Search, 403, "{}");
        assert_eq!(err.status(), 403);
        assert_eq!(err.to_string(), "Forbidden. Check your Apollo subscription plan.");

        let err = classify(
            Provider::Hubspot,
            Endpoint::Push,
            403,
            r#"{"message": "This app hasn't been granted crm.objects.companies.write"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Missing required HubSpot permission (scope): This app hasn't been granted crm.objects.companies.write"
        );
    }

    #[test]
    fn test_not_found_only_on_search() {
        let err = classify(Provider::Apollo, Endpoint::Search, 404, "");
        assert_eq!(err.kind(), PushErrorKind::NotFound);

        let err = classify(Provider::Hubspot, Endpoint::Push, 404, "missing");
        assert_eq!(err.kind(), PushErrorKind::Unclassified);
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_duplicate_only_on_push() {
        let err = classify(Provider::Hubspot, Endpoint::Push, 409, r#"{"message": "Contact already exists"}"#);
        assert_eq!(err, ProviderError::Duplicate("Contact already exists".to_string()));

        let err = classify(
            Provider::Hubspot,
            Endpoint::Push,
            400,
            r#"{"status": "error", "message": "Duplicate value found for domain"}"#,
        );
        assert_eq!(err.kind(), PushErrorKind::Duplicate);

        let err = classify(Provider::Apollo, Endpoint::Search, 409, "conflict");
        assert_eq!(err.kind(), PushErrorKind::Unclassified);
    }

    #[test]
    fn test_rate_limited_is_retryable() {
        let err = classify(Provider::Hubspot, Endpoint::Push, 429, "slow down");
        assert_eq!(err.kind(), PushErrorKind::RateLimited);
        assert!(err.is_retryable());
        assert!(!classify(Provider::Apollo, Endpoint::Search, 401, "").is_retryable());
    }

    #[test]
    fn test_unclassified_keeps_full_body() {
        let body = "x".repeat(250);
        let err = classify(Provider::Apollo, Endpoint::Search, 500, &body);

        assert_eq!(err.status(), 500);
        assert_eq!(err.detail().len(), 250);
        assert_eq!(err.to_string(), format!("Apollo error [500]: {}", "x".repeat(100)));
    }

    #[test]
    fn test_error_detail_prefers_json_message() {
        assert_eq!(error_detail(r#"{"message": "bad email"}"#), "bad email");
        assert_eq!(error_detail(r#"{"error": "nope"}"#), r#"{"error": "nope"}"#);
        assert_eq!(error_detail("plain text"), "plain text");
    }

    #[test]
    fn test_request_error_is_validation() {
        let err: ProviderError = RequestError::MissingApiKey.into();
        assert_eq!(err.status(), 400);
        assert_eq!(err.kind(), PushErrorKind::Validation);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(150);
        assert_eq!(preview(&text).chars().count(), 100);
    }
}
