use crate::{auth, custom_prompt, info, summarizer};
use summerizer_core::{
    auth::dto::HeaderAction,
    document::dto::{DocumentUpload, SelectedFile},
    notification::dto::{Notification, NotificationVariant},
    summary::dto::{Summary, SummaryHandoff},
    viewer::dto::{DetailedPoint, LoadingView, QuickPoint, SummaryView},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        auth::handler::sign_out,
        summarizer::handler::create_intake,
        summarizer::handler::get_intake,
        summarizer::handler::delete_intake,
        summarizer::handler::submit_document,
        summarizer::handler::download_intake,
        summarizer::handler::share_intake,
        summarizer::handler::hand_off,
        custom_prompt::handler::enter_refinement,
        custom_prompt::handler::get_refinement,
        custom_prompt::handler::delete_refinement,
        custom_prompt::handler::generate,
        custom_prompt::handler::reset,
        custom_prompt::handler::download_refinement,
        custom_prompt::handler::share_refinement,
    ),
    components(schemas(
        info::dto::Info,
        summarizer::dto::SessionCreated,
        summarizer::dto::IntakeView,
        custom_prompt::dto::GenerateRequest,
        custom_prompt::dto::RefinementView,
        DocumentUpload,
        SelectedFile,
        Summary,
        SummaryHandoff,
        SummaryView,
        QuickPoint,
        DetailedPoint,
        LoadingView,
        HeaderAction,
        Notification,
        NotificationVariant,
    ))
)]
pub struct ApiDoc;
