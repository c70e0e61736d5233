use serde::{Deserialize, Serialize};
use summerizer_core::{
    auth::dto::HeaderAction,
    document::dto::SelectedFile,
    notification::dto::Notification,
    viewer::dto::{LoadingView, SummaryView},
};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    #[schema(value_type = String)]
    pub session_id: Uuid,
}

/// Everything the intake page renders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeView {
    #[schema(value_type = String)]
    pub session_id: Uuid,
    pub is_uploading: bool,
    pub selected_file: Option<SelectedFile>,
    pub show_how_it_works: bool,
    pub loading: Option<LoadingView>,
    pub summary: Option<SummaryView>,
    pub header_action: HeaderAction,
    pub notifications: Vec<Notification>,
}
