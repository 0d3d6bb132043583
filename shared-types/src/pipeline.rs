use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{PushResult, VerifiedContact};

/// Result of a fetch, verify and push run.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PipelineReport {
    pub total: usize,
    pub contacts: Vec<VerifiedContact>,
    pub crm_results: Vec<PushResult>,
    pub started_at: i64,
    pub completed_at: i64,
}
