use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SummerizerError;

/// Structured summarization result. Immutable once built: refinement produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "SummaryPayload")]
pub struct Summary {
    title: String,
    quick_summary: Vec<String>,
    detailed_summary: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPayload {
    title: String,
    quick_summary: Vec<String>,
    detailed_summary: Vec<String>,
}

impl TryFrom<SummaryPayload> for Summary {
    type Error = SummerizerError;

    fn try_from(payload: SummaryPayload) -> Result<Self, Self::Error> {
        Summary::new(payload.title, payload.quick_summary, payload.detailed_summary)
    }
}

impl Summary {
    pub fn new(
        title: impl Into<String>,
        quick_summary: Vec<String>,
        detailed_summary: Vec<String>,
    ) -> Result<Self, SummerizerError> {
        if quick_summary.is_empty() {
            return Err(SummerizerError::InvalidSummary(
                "quick summary must not be empty".to_string(),
            ));
        }
        if detailed_summary.is_empty() {
            return Err(SummerizerError::InvalidSummary(
                "detailed summary must not be empty".to_string(),
            ));
        }

        Ok(Self {
            title: title.into(),
            quick_summary,
            detailed_summary,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quick_summary(&self) -> &[String] {
        &self.quick_summary
    }

    pub fn detailed_summary(&self) -> &[String] {
        &self.detailed_summary
    }

    /// Same title, both point lists replaced.
    pub fn with_points(
        &self,
        quick_summary: Vec<String>,
        detailed_summary: Vec<String>,
    ) -> Result<Self, SummerizerError> {
        Summary::new(self.title.clone(), quick_summary, detailed_summary)
    }
}

/// Navigation payload handed from the intake flow to the refinement flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryHandoff {
    pub summary: Option<Summary>,
    pub summary_id: Option<String>,
}

impl From<Summary> for SummaryHandoff {
    fn from(summary: Summary) -> Self {
        Self {
            summary: Some(summary),
            summary_id: Some(uuid::Uuid::new_v4().to_string()),
        }
    }
}
