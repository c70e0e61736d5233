use axum::{Extension, http::StatusCode};
use summerizer_core::auth::handler::{AuthProvider, TokenSession};

#[utoipa::path(
    post,
    path = "/sign-out",
    description = "Revoke the bearer token of the caller",
    responses(
        (status = 204, description = "Signed out"),
    )
)]
pub async fn sign_out(Extension(session): Extension<TokenSession>) -> StatusCode {
    session.sign_out();

    StatusCode::NO_CONTENT
}
