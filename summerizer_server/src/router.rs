use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use summerizer_core::helpers::{config::SummerizerConfig, jwt::JwtManager};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    auth::handler::sign_out,
    custom_prompt::handler::{
        delete_refinement, download_refinement, enter_refinement, generate, get_refinement, reset,
        share_refinement,
    },
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    middlewares::handler::session,
    state::{SWEEP_PERIOD, ServerState, spawn_sweeper},
    summarizer::handler::{
        create_intake, delete_intake, download_intake, get_intake, hand_off, share_intake,
        submit_document,
    },
};

pub fn router() -> anyhow::Result<Router> {
    let config = SummerizerConfig::from_env()?;
    let summarizer = config.build_summarizer()?;
    let jwt = JwtManager::from_env()?;

    log::info!("Concurrency policy: {:?}", config.policy);
    log::info!("Idle sessions expire after {:?}", config.session_ttl);

    let state = Arc::new(
        ServerState::from((summarizer, config.policy, jwt)).with_session_ttl(config.session_ttl),
    );
    spawn_sweeper(state.clone(), SWEEP_PERIOD);

    Ok(app(state))
}

pub fn app(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    let summarizer_router = Router::new()
        .route("/summarizer", post(create_intake))
        .route("/summarizer/{id}", get(get_intake).delete(delete_intake))
        .route("/summarizer/{id}/document", post(submit_document))
        .route("/summarizer/{id}/download", get(download_intake))
        .route("/summarizer/{id}/share", post(share_intake))
        .route("/summarizer/{id}/custom-prompt", post(hand_off));

    let custom_prompt_router = Router::new()
        .route("/custom-prompt", post(enter_refinement))
        .route(
            "/custom-prompt/{id}",
            get(get_refinement).delete(delete_refinement),
        )
        .route("/custom-prompt/{id}/generate", post(generate))
        .route("/custom-prompt/{id}/reset", post(reset))
        .route("/custom-prompt/{id}/download", get(download_refinement))
        .route("/custom-prompt/{id}/share", post(share_refinement));

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .merge(summarizer_router)
        .merge(custom_prompt_router)
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/sign-out", post(sign_out))
        .layer(middleware::from_fn_with_state(state.clone(), session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use base64::{Engine as _, engine::general_purpose};
    use serde_json::{Value, json};
    use summerizer_core::{ai::mock::MockSummarizer, processing::dto::ConcurrencyPolicy};
    use tower::ServiceExt;

    use super::*;

    const SECRET: &str = "test-secret";

    fn test_app() -> Router {
        let state = ServerState::from((
            Arc::new(MockSummarizer::instant()) as Arc<dyn summerizer_core::ai::summarizer::Summarizer>,
            ConcurrencyPolicy::Supersede,
            JwtManager::new(SECRET),
        ));
        app(Arc::new(state))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn open_intake(app: &Router) -> String {
        let (status, _, body) = send(app, "POST", "/summarizer", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        json_of(&body)["sessionId"].as_str().unwrap().to_string()
    }

    fn upload(file_name: &str, mime_type: &str) -> Value {
        json!({
            "fileName": file_name,
            "mimeType": mime_type,
            "content": general_purpose::STANDARD.encode(vec![7u8; 2048]),
        })
    }

    async fn summarized_intake(app: &Router) -> String {
        let id = open_intake(app).await;
        let (status, _, _) = send(
            app,
            "POST",
            &format!("/summarizer/{}/document", id),
            Some(upload("invoice.pdf", "application/pdf")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        id
    }

    #[tokio::test]
    async fn test_info() {
        let app = test_app();
        let (status, _, body) = send(&app, "GET", "/", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["name"], "summerizer_server");
    }

    #[tokio::test]
    async fn test_fresh_intake_view() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, _, body) = send(&app, "GET", &format!("/summarizer/{}", id), None, None).await;
        let view = json_of(&body);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["isUploading"], false);
        assert_eq!(view["showHowItWorks"], true);
        assert_eq!(view["summary"], Value::Null);
        assert_eq!(view["headerAction"], "signIn");
    }

    #[tokio::test]
    async fn test_submit_pdf_produces_summary() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/document", id),
            Some(upload("invoice.pdf", "application/pdf")),
            None,
        )
        .await;
        let view = json_of(&body);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["summary"]["title"], "invoice");
        assert_eq!(view["summary"]["quickSummary"].as_array().unwrap().len(), 5);
        assert_eq!(view["summary"]["detailedSummary"][0]["heading"], "Point 1");
        assert_eq!(view["selectedFile"]["name"], "invoice.pdf");
        assert_eq!(view["selectedFile"]["sizeLabel"], "0.00 MB");
        assert_eq!(view["notifications"][0]["title"], "Document processed successfully");

        let (_, _, body) = send(&app, "GET", &format!("/summarizer/{}", id), None, None).await;
        assert!(json_of(&body)["notifications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_non_pdf_is_ignored() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/document", id),
            Some(upload("notes.txt", "text/plain")),
            None,
        )
        .await;
        let view = json_of(&body);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["summary"], Value::Null);
        assert_eq!(view["selectedFile"], Value::Null);
        assert!(view["notifications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_base64_is_rejected() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, _, _) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/document", id),
            Some(json!({
                "fileName": "a.pdf",
                "mimeType": "application/pdf",
                "content": "not base64 !!",
            })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_intake_summary() {
        let app = test_app();
        let id = summarized_intake(&app).await;

        let (status, headers, body) =
            send(&app, "GET", &format!("/summarizer/{}/download", id), None, None).await;
        let text = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"invoice-summary.txt\""
        );
        assert!(text.starts_with("invoice\n\nQUICK SUMMARY:\n1. "));
        assert!(text.contains("DETAILED SUMMARY:\nPoint 1: "));

        let (_, _, body) = send(&app, "GET", &format!("/summarizer/{}", id), None, None).await;
        let view = json_of(&body);
        let titles: Vec<_> = view["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap().to_string())
            .collect();
        assert!(titles.contains(&"Summary downloaded".to_string()));
    }

    #[tokio::test]
    async fn test_download_without_summary_is_not_found() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, _, _) =
            send(&app, "GET", &format!("/summarizer/{}/download", id), None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_and_closed_sessions() {
        let app = test_app();
        let unknown = uuid::Uuid::new_v4();

        let (status, _, _) =
            send(&app, "GET", &format!("/summarizer/{}", unknown), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let id = open_intake(&app).await;
        let (status, _, _) =
            send(&app, "DELETE", &format!("/summarizer/{}", id), None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&app, "GET", &format!("/summarizer/{}", id), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_hand_off_without_summary_redirects() {
        let app = test_app();
        let id = open_intake(&app).await;

        let (status, headers, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/custom-prompt", id),
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/summarizer");
        assert_eq!(json_of(&body)["notification"]["title"], "No summary found");
    }

    #[tokio::test]
    async fn test_refinement_flow() {
        let app = test_app();
        let intake = summarized_intake(&app).await;

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/custom-prompt", intake),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json_of(&body)["sessionId"].as_str().unwrap().to_string();

        let (_, _, body) = send(&app, "GET", &format!("/custom-prompt/{}", id), None, None).await;
        let view = json_of(&body);
        assert_eq!(view["summary"]["title"], "invoice");
        assert_eq!(
            view["summary"]["description"],
            "Key points extracted from your document"
        );
        assert_eq!(view["prompt"], Value::Null);
        assert!(view["summaryId"].is_string());
        assert_eq!(view["canReset"], true);

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/custom-prompt/{}/generate", id),
            Some(json!({ "prompt": "Focus on payment terms" })),
            None,
        )
        .await;
        let view = json_of(&body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["summary"]["title"], "invoice");
        assert_eq!(
            view["summary"]["description"],
            "Summary focused on: \"Focus on payment terms\""
        );
        assert_eq!(view["prompt"], "Focus on payment terms");
        assert_eq!(view["notifications"][0]["title"], "Summary updated");

        let (status, _, body) =
            send(&app, "POST", &format!("/custom-prompt/{}/reset", id), None, None).await;
        let view = json_of(&body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["prompt"], Value::Null);
        assert_eq!(view["notifications"][0]["title"], "Summary reset");

        let (_, _, intake_body) =
            send(&app, "GET", &format!("/summarizer/{}", intake), None, None).await;
        assert_eq!(json_of(&intake_body)["summary"], view["summary"]);
    }

    #[tokio::test]
    async fn test_empty_prompt_leaves_view_unchanged() {
        let app = test_app();
        let intake = summarized_intake(&app).await;
        let (_, _, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/custom-prompt", intake),
            None,
            None,
        )
        .await;
        let id = json_of(&body)["sessionId"].as_str().unwrap().to_string();

        let (_, _, body) = send(&app, "GET", &format!("/custom-prompt/{}", id), None, None).await;
        let before = json_of(&body);

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/custom-prompt/{}/generate", id),
            Some(json!({ "prompt": "   " })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let view = json_of(&body);
        assert_eq!(view["summary"], before["summary"]);
        assert_eq!(
            view["summary"]["description"],
            "Key points extracted from your document"
        );
        assert!(view["prompt"].is_null());
        assert_eq!(view["isProcessing"], false);
        assert_eq!(view["notifications"], json!([]));
    }

    #[tokio::test]
    async fn test_enter_refinement_with_explicit_handoff() {
        let app = test_app();

        let (status, headers, _) = send(&app, "POST", "/custom-prompt", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/summarizer");

        let (status, _, body) = send(
            &app,
            "POST",
            "/custom-prompt",
            Some(json!({
                "summary": {
                    "title": "Q3/report",
                    "quickSummary": ["a"],
                    "detailedSummary": ["b"],
                },
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json_of(&body)["sessionId"].as_str().unwrap().to_string();

        let (status, headers, body) = send(
            &app,
            "GET",
            &format!("/custom-prompt/{}/download", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Q3_report-summary.txt\""
        );
        assert!(String::from_utf8(body).unwrap().starts_with("Q3/report\n"));
    }

    #[tokio::test]
    async fn test_header_action_follows_session() {
        let app = test_app();
        let token = JwtManager::new(SECRET).generate_token("user-1").unwrap();
        let intake = summarized_intake(&app).await;

        let (_, _, body) = send(
            &app,
            "GET",
            &format!("/summarizer/{}", intake),
            None,
            Some(&token),
        )
        .await;
        assert_eq!(json_of(&body)["headerAction"], "signOut");

        let (_, _, body) = send(
            &app,
            "POST",
            &format!("/summarizer/{}/custom-prompt", intake),
            None,
            Some(&token),
        )
        .await;
        let id = json_of(&body)["sessionId"].as_str().unwrap().to_string();
        let (_, _, body) = send(
            &app,
            "GET",
            &format!("/custom-prompt/{}", id),
            None,
            Some(&token),
        )
        .await;
        assert_eq!(json_of(&body)["headerAction"], "dashboard");

        let (_, _, body) = send(
            &app,
            "GET",
            &format!("/summarizer/{}", intake),
            None,
            Some("garbage"),
        )
        .await;
        assert_eq!(json_of(&body)["headerAction"], "signIn");

        let (status, _, _) = send(&app, "POST", "/sign-out", None, Some(&token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, _, body) = send(
            &app,
            "GET",
            &format!("/summarizer/{}", intake),
            None,
            Some(&token),
        )
        .await;
        assert_eq!(json_of(&body)["headerAction"], "signIn");
    }

    #[tokio::test]
    async fn test_share_is_accepted() {
        let app = test_app();
        let id = summarized_intake(&app).await;

        let (status, _, _) =
            send(&app, "POST", &format!("/summarizer/{}/share", id), None, None).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_docs_list_routes() {
        let app = test_app();
        let (status, _, body) = send(&app, "GET", "/docs", None, None).await;
        let doc = json_of(&body);

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/summarizer/{id}/document"].is_object());
        assert!(doc["paths"]["/custom-prompt/{id}/generate"].is_object());
    }
}
