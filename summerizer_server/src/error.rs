use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use summerizer_core::{error::SummerizerError, notification::dto::Notification};
use utoipa::ToResponse;

#[derive(Debug, Serialize, ToResponse)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl ErrorServer {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.into(),
            redirect: None,
            notification: None,
        }
    }
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<SummerizerError> for ErrorServer {
    fn from(error: SummerizerError) -> Self {
        let status = match &error {
            SummerizerError::ValidationRejected(_) | SummerizerError::InvalidSummary(_) => {
                StatusCode::BAD_REQUEST
            }
            SummerizerError::InFlight => StatusCode::CONFLICT,
            SummerizerError::ProcessingFailed(_) => StatusCode::BAD_GATEWAY,
            SummerizerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            SummerizerError::NavigationStateMissing => StatusCode::SEE_OTHER,
            SummerizerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut error_server = ErrorServer::new(status, error.to_string());
        if error == SummerizerError::NavigationStateMissing {
            error_server.redirect = Some("/summarizer".to_string());
            error_server.notification = Some(Notification::no_summary_found());
        }
        error_server
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let location = self.redirect.clone();
        let mut response = (status, Json(self)).into_response();
        if let Some(location) = location.and_then(|l| l.parse().ok()) {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    }
}
