use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use summerizer_core::{
    auth::{dto::HeaderAction, handler::AuthProvider, handler::TokenSession},
    document::dto::{Document, DocumentUpload},
    intake::handler::UploadController,
    notification::dto::Notification,
    refinement::handler::{DEFAULT_DESCRIPTION, RefinementController},
    viewer::{
        dto::{DownloadArtifact, LoadingView, SummaryView},
        handler::download,
    },
};
use uuid::Uuid;

use super::dto::{IntakeView, SessionCreated};
use crate::{error::ErrorServer, state::ServerState};

fn intake_view(id: Uuid, controller: &UploadController, session: &TokenSession) -> IntakeView {
    let user = session.current_user();
    let is_uploading = controller.is_uploading();

    IntakeView {
        session_id: id,
        is_uploading,
        selected_file: controller.selected_file(),
        show_how_it_works: controller.show_how_it_works(),
        loading: is_uploading.then(LoadingView::default),
        summary: controller
            .summary()
            .map(|summary| SummaryView::project(&summary, DEFAULT_DESCRIPTION)),
        header_action: HeaderAction::for_intake(user.as_ref()),
        notifications: controller.drain_notifications(),
    }
}

/// Text attachment for the browser's save dialog.
pub fn attachment(artifact: DownloadArtifact) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name.replace('"', "'")
    );

    (
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.content,
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/summarizer",
    description = "Open an intake session",
    responses(
        (status = 201, description = "Created", body = SessionCreated),
    )
)]
pub async fn create_intake(
    State(server_state): State<Arc<ServerState>>,
) -> (StatusCode, Json<SessionCreated>) {
    let (session_id, _) = server_state.open_intake();

    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

#[utoipa::path(
    get,
    path = "/summarizer/{id}",
    description = "Current intake view; pending notifications are delivered once",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 200, description = "Success", body = IntakeView),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn get_intake(
    State(server_state): State<Arc<ServerState>>,
    Extension(session): Extension<TokenSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeView>, ErrorServer> {
    let controller = server_state.intake(id)?;

    Ok(Json(intake_view(id, &controller, &session)))
}

#[utoipa::path(
    delete,
    path = "/summarizer/{id}",
    description = "Leave the intake view; a pending result is dropped",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 204, description = "Closed"),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn delete_intake(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorServer> {
    server_state.close_intake(id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/summarizer/{id}/document",
    request_body = DocumentUpload,
    description = "Submit a document; anything that is not a PDF is ignored",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 200, description = "Success", body = IntakeView),
        (status = 400, description = "Undecodable content"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "A document is already being processed"),
    )
)]
pub async fn submit_document(
    State(server_state): State<Arc<ServerState>>,
    Extension(session): Extension<TokenSession>,
    Path(id): Path<Uuid>,
    Json(upload): Json<DocumentUpload>,
) -> Result<Json<IntakeView>, ErrorServer> {
    let controller = server_state.intake(id)?;
    let document = Document::try_from(upload)?;

    let outcome = controller.submit_document(document).await?;
    log::debug!("Intake {} submit finished: {:?}", id, outcome);

    Ok(Json(intake_view(id, &controller, &session)))
}

#[utoipa::path(
    get,
    path = "/summarizer/{id}/download",
    description = "Summary as a plain-text file",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 200, description = "Success", content_type = "text/plain"),
        (status = 404, description = "Unknown session or no summary yet"),
    )
)]
pub async fn download_intake(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ErrorServer> {
    let controller = server_state.intake(id)?;
    let summary = controller
        .summary()
        .ok_or_else(|| ErrorServer::new(StatusCode::NOT_FOUND, "No summary to download"))?;

    controller.notify(Notification::summary_downloaded());

    Ok(attachment(download(&summary)))
}

#[utoipa::path(
    post,
    path = "/summarizer/{id}/share",
    description = "Share the current summary",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 204, description = "Shared"),
        (status = 404, description = "Unknown session or no summary yet"),
    )
)]
pub async fn share_intake(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorServer> {
    let controller = server_state.intake(id)?;
    let summary = controller
        .summary()
        .ok_or_else(|| ErrorServer::new(StatusCode::NOT_FOUND, "No summary to share"))?;

    server_state.share().share(&summary).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/summarizer/{id}/custom-prompt",
    description = "Hand the current summary over to a new custom-prompt session",
    params(("id" = String, Path, description = "Intake session id")),
    responses(
        (status = 201, description = "Created", body = SessionCreated),
        (status = 303, description = "No summary yet; back to the intake view"),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn hand_off(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionCreated>), ErrorServer> {
    let controller = server_state.intake(id)?;
    let refinement = RefinementController::enter(controller.handoff(), server_state.summarizer())?;

    let session_id = server_state.open_refinement(refinement);

    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}
