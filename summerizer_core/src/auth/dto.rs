use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The single button in the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum HeaderAction {
    SignIn,
    SignOut,
    Dashboard,
}
