use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Typed reason a single CRM push failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PushErrorKind {
    Validation,
    InvalidCredentials,
    Forbidden,
    NotFound,
    Duplicate,
    RateLimited,
    Transport,
    Decode,
    Unclassified,
}

/// Error descriptor for one record. `input` echoes the offending record
/// (email, company name or person name) so callers can correlate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PushFailure {
    pub status: u16,
    pub kind: PushErrorKind,
    pub error: String,
    pub input: String,
}

/// Outcome of pushing one record to the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum PushResult {
    Created {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    Failed(PushFailure),
}

impl PushResult {
    pub fn created(id: impl Into<String>) -> Self {
        PushResult::Created {
            id: id.into(),
            warning: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PushResult::Created { .. })
    }

    /// Provider-assigned id. A creation acknowledged without one reads as `None`.
    pub fn id(&self) -> Option<&str> {
        match self {
            PushResult::Created { id, .. } => Some(id.as_str()).filter(|id| !id.is_empty()),
            PushResult::Failed(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            PushResult::Created { warning, .. } => warning.as_deref(),
            PushResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&PushFailure> {
        match self {
            PushResult::Failed(failure) => Some(failure),
            PushResult::Created { .. } => None,
        }
    }
}

/// Tally over a batch of push results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PushSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub with_warnings: usize,
}

impl PushSummary {
    pub fn from_results(results: &[PushResult]) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        let with_warnings = results.iter().filter(|r| r.warning().is_some()).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            with_warnings,
        }
    }
}
