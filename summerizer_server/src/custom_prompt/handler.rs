use std::sync::Arc;

use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::Response,
};
use summerizer_core::{
    auth::{dto::HeaderAction, handler::AuthProvider, handler::TokenSession},
    notification::dto::Notification,
    refinement::handler::RefinementController,
    summary::dto::SummaryHandoff,
    viewer::{dto::SummaryView, handler::download},
};
use uuid::Uuid;

use super::dto::{GenerateRequest, RefinementView};
use crate::{
    error::ErrorServer, state::ServerState, summarizer::dto::SessionCreated,
    summarizer::handler::attachment,
};

fn refinement_view(
    id: Uuid,
    controller: &RefinementController,
    session: &TokenSession,
) -> RefinementView {
    let user = session.current_user();

    RefinementView {
        session_id: id,
        summary_id: controller.summary_id(),
        summary: SummaryView::project(&controller.current(), controller.description()),
        prompt: controller.prompt(),
        is_processing: controller.is_processing(),
        can_reset: controller.can_reset(),
        header_action: HeaderAction::for_refinement(user.as_ref()),
        notifications: controller.drain_notifications(),
    }
}

#[utoipa::path(
    post,
    path = "/custom-prompt",
    request_body = SummaryHandoff,
    description = "Open a custom-prompt session from an explicit handoff",
    responses(
        (status = 201, description = "Created", body = SessionCreated),
        (status = 303, description = "No summary in the handoff; back to the intake view"),
    )
)]
pub async fn enter_refinement(
    State(server_state): State<Arc<ServerState>>,
    Json(handoff): Json<SummaryHandoff>,
) -> Result<(StatusCode, Json<SessionCreated>), ErrorServer> {
    let controller = RefinementController::enter(handoff, server_state.summarizer())?;
    let session_id = server_state.open_refinement(controller);

    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

#[utoipa::path(
    get,
    path = "/custom-prompt/{id}",
    description = "Current custom-prompt view; pending notifications are delivered once",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 200, description = "Success", body = RefinementView),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn get_refinement(
    State(server_state): State<Arc<ServerState>>,
    Extension(session): Extension<TokenSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<RefinementView>, ErrorServer> {
    let controller = server_state.refinement(id)?;

    Ok(Json(refinement_view(id, &controller, &session)))
}

#[utoipa::path(
    delete,
    path = "/custom-prompt/{id}",
    description = "Leave the custom-prompt view; a pending result is dropped",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 204, description = "Closed"),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn delete_refinement(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorServer> {
    server_state.close_refinement(id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/custom-prompt/{id}/generate",
    request_body = GenerateRequest,
    description = "Regenerate the summary around a prompt",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 200, description = "Success; an empty prompt leaves the view unchanged", body = RefinementView),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "A refinement is already running"),
    )
)]
pub async fn generate(
    State(server_state): State<Arc<ServerState>>,
    Extension(session): Extension<TokenSession>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<RefinementView>, ErrorServer> {
    let controller = server_state.refinement(id)?;

    let outcome = controller.refine(&request.prompt).await?;
    log::debug!("Refinement {} finished: {:?}", id, outcome);

    Ok(Json(refinement_view(id, &controller, &session)))
}

#[utoipa::path(
    post,
    path = "/custom-prompt/{id}/reset",
    description = "Back to the summary that was handed over",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 200, description = "Success", body = RefinementView),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn reset(
    State(server_state): State<Arc<ServerState>>,
    Extension(session): Extension<TokenSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<RefinementView>, ErrorServer> {
    let controller = server_state.refinement(id)?;
    controller.reset();

    Ok(Json(refinement_view(id, &controller, &session)))
}

#[utoipa::path(
    get,
    path = "/custom-prompt/{id}/download",
    description = "Current summary as a plain-text file",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 200, description = "Success", content_type = "text/plain"),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn download_refinement(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ErrorServer> {
    let controller = server_state.refinement(id)?;
    let artifact = download(&controller.current());
    controller.notify(Notification::summary_downloaded());

    Ok(attachment(artifact))
}

#[utoipa::path(
    post,
    path = "/custom-prompt/{id}/share",
    description = "Share the current summary",
    params(("id" = String, Path, description = "Custom-prompt session id")),
    responses(
        (status = 204, description = "Shared"),
        (status = 404, description = "Unknown session"),
    )
)]
pub async fn share_refinement(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorServer> {
    let controller = server_state.refinement(id)?;
    server_state.share().share(&controller.current()).await?;

    Ok(StatusCode::NO_CONTENT)
}
