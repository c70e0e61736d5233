use serde::{Deserialize, Serialize};
use summerizer_core::{
    auth::dto::HeaderAction, notification::dto::Notification, viewer::dto::SummaryView,
};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefinementView {
    #[schema(value_type = String)]
    pub session_id: Uuid,
    pub summary_id: Option<String>,
    pub summary: SummaryView,
    pub prompt: Option<String>,
    pub is_processing: bool,
    pub can_reset: bool,
    pub header_action: HeaderAction,
    pub notifications: Vec<Notification>,
}
