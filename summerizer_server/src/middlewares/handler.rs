use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use summerizer_core::auth::handler::TokenSession;

use crate::state::ServerState;

/// Resolves the optional bearer token into a session. Bad tokens mean "signed out".
pub async fn session(
    State(server_state): State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let session = TokenSession::from_header(
        server_state.jwt().clone(),
        server_state.revoked().clone(),
        header.as_deref(),
    );

    req.extensions_mut().insert(session);

    next.run(req).await
}
