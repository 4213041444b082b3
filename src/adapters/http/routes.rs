//! Route configuration for the document generation service.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::DeliveryMode;

use super::handlers::{download_artifact, generate_document, AppState};

/// Creates the service router.
///
/// Routes:
/// - `POST /` - generate a document
/// - `GET /download/:arquivo` - fetch a stored artifact (URL delivery mode only)
pub fn app_router(state: AppState) -> Router {
    let router = Router::new().route("/", post(generate_document));

    let router = match state.delivery {
        DeliveryMode::Url => router.route("/download/:arquivo", get(download_artifact)),
        DeliveryMode::Inline => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::adapters::pdf::PlainTextPdfRenderer;
    use crate::adapters::storage::LocalArtifactStore;
    use crate::application::DocumentPipeline;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(dir: &std::path::Path, delivery: DeliveryMode) -> AppState {
        let generator = Arc::new(MockTextGenerator::returning("# Doc"));
        let pipeline = Arc::new(DocumentPipeline::new(
            generator,
            Arc::new(PlainTextPdfRenderer::new()),
            Arc::new(LocalArtifactStore::new(dir)),
        ));
        AppState::new(
            pipeline,
            Arc::new(LocalArtifactStore::new(dir)),
            "http://localhost:3000",
            delivery,
        )
    }

    #[tokio::test]
    async fn url_mode_mounts_the_download_route() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_router(test_state(dir.path(), DeliveryMode::Url));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download/nao_existe.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Mounted: the handler answers 404, not the router's fallback.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn inline_mode_does_not_mount_the_download_route() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_router(test_state(dir.path(), DeliveryMode::Inline));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download/qualquer.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        // Router fallback, not the handler: no JSON error body.
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}
