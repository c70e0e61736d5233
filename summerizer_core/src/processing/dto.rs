use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::summary::dto::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Idle,
    Processing,
    Succeeded,
    /// The last call failed; a new call may start straight away.
    Failed,
}

/// What to do with a call that arrives while another one is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyPolicy {
    /// The newest call wins; older results are discarded on arrival.
    #[default]
    Supersede,
    /// Refuse new calls until the running one resolves.
    #[serde(alias = "reject")]
    RejectWhileInFlight,
}

impl std::str::FromStr for ConcurrencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supersede" | "last-wins" => Ok(ConcurrencyPolicy::Supersede),
            "reject" | "reject-while-in-flight" => Ok(ConcurrencyPolicy::RejectWhileInFlight),
            other => Err(format!("unknown concurrency policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Completed(Summary),
    /// The capability failed; the last good summary (if any) is kept.
    Failed(String),
    /// A newer call or an abandon happened first; the result was dropped.
    Superseded,
}
