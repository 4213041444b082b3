//! Integration tests for the document generation HTTP interface.
//!
//! Exercises the full pipeline through the router: validation, generation
//! (stubbed), rendering (real), ephemeral storage (tempdir) and both delivery
//! variants, including the delete-on-fetch lifecycle.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use docsmith::adapters::ai::MockTextGenerator;
use docsmith::adapters::http::{app_router, AppState};
use docsmith::adapters::pdf::PlainTextPdfRenderer;
use docsmith::adapters::storage::LocalArtifactStore;
use docsmith::application::DocumentPipeline;
use docsmith::config::DeliveryMode;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn build_app(
    generator: MockTextGenerator,
    dir: &Path,
    delivery: DeliveryMode,
) -> (Router, Arc<MockTextGenerator>) {
    let generator = Arc::new(generator);
    let store = Arc::new(LocalArtifactStore::new(dir));
    let pipeline = Arc::new(DocumentPipeline::new(
        generator.clone(),
        Arc::new(PlainTextPdfRenderer::new()),
        store.clone(),
    ));
    let state = AppState::new(pipeline, store, "http://localhost:3000", delivery);
    (app_router(state), generator)
}

fn post_generate(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_download(file: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/download/{file}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn stored_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect()
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn missing_fields_return_400_without_calling_the_generator() {
    let dir = tempfile::tempdir().unwrap();
    let (app, generator) = build_app(
        MockTextGenerator::returning("# Doc"),
        dir.path(),
        DeliveryMode::Url,
    );

    for body in [
        json!({}),
        json!({ "prompt": "tema" }),
        json!({ "comoGerar": "bullets" }),
        json!({ "prompt": "", "comoGerar": "bullets" }),
        json!({ "prompt": "tema", "comoGerar": "   " }),
    ] {
        let response = app.clone().oneshot(post_generate(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = body_json(response).await;
        assert_eq!(
            payload["erro"],
            "Campos 'prompt' e 'comoGerar' são obrigatórios."
        );
    }

    assert_eq!(generator.call_count(), 0);
    assert!(stored_files(dir.path()).is_empty());
}

// =============================================================================
// URL delivery mode
// =============================================================================

#[tokio::test]
async fn generate_then_fetch_delivers_the_pdf_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = build_app(
        MockTextGenerator::returning("# Relatorio\n- a\n- b\n- c"),
        dir.path(),
        DeliveryMode::Url,
    );

    // Generate: the artifact name is the deterministic slug of the topic.
    let response = app
        .clone()
        .oneshot(post_generate(json!({
            "prompt": "relatorio de vendas",
            "comoGerar": "lista com 3 bullet points"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(
        payload["url"],
        "http://localhost:3000/download/relatorio_de_vendas.pdf"
    );
    assert_eq!(stored_files(dir.path()), vec!["relatorio_de_vendas.pdf"]);

    // First fetch succeeds and deletes the artifact.
    let response = app
        .clone()
        .oneshot(get_download("relatorio_de_vendas.pdf"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"relatorio_de_vendas.pdf\""
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!bytes.is_empty());
    assert!(stored_files(dir.path()).is_empty());

    // Second fetch of the same name 404s.
    let response = app
        .oneshot(get_download("relatorio_de_vendas.pdf"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetching_an_unknown_artifact_is_404_not_500() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = build_app(
        MockTextGenerator::returning("# Doc"),
        dir.path(),
        DeliveryMode::Url,
    );

    let response = app.oneshot(get_download("inexistente.pdf")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = body_json(response).await;
    assert_eq!(payload["erro"], "Arquivo não encontrado.");
}

#[tokio::test]
async fn malformed_artifact_names_are_rejected_with_404() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = build_app(
        MockTextGenerator::returning("# Doc"),
        dir.path(),
        DeliveryMode::Url,
    );

    for name in ["..%2Fetc%2Fpasswd.pdf", "notas.txt", ".oculto.pdf"] {
        let response = app.clone().oneshot(get_download(name)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "name: {name}");
    }
}

// =============================================================================
// Inline delivery mode
// =============================================================================

#[tokio::test]
async fn inline_mode_streams_the_pdf_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = build_app(
        MockTextGenerator::returning("# Relatorio\n- a\n- b\n- c"),
        dir.path(),
        DeliveryMode::Inline,
    );

    let response = app
        .oneshot(post_generate(json!({
            "prompt": "relatorio de vendas",
            "comoGerar": "lista com 3 bullet points"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));

    // Artifact deleted right after its bytes were read for the response.
    assert!(stored_files(dir.path()).is_empty());
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn generator_failure_returns_500_and_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let (app, generator) = build_app(MockTextGenerator::failing(), dir.path(), DeliveryMode::Url);

    let response = app
        .oneshot(post_generate(json!({
            "prompt": "relatorio de vendas",
            "comoGerar": "lista com 3 bullet points"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = body_json(response).await;
    assert_eq!(payload["erro"], "Erro ao gerar documento.");

    assert_eq!(generator.call_count(), 1);
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn empty_completion_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = build_app(
        MockTextGenerator::returning_empty(),
        dir.path(),
        DeliveryMode::Url,
    );

    let response = app
        .oneshot(post_generate(json!({
            "prompt": "tema",
            "comoGerar": "como"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(stored_files(dir.path()).is_empty());
}
