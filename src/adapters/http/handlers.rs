//! HTTP handlers for the document generation endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::DocumentPipeline;
use crate::config::DeliveryMode;
use crate::domain::{ArtifactName, GenerationRequest};
use crate::ports::ArtifactStore;

use super::dto::{DownloadUrlResponse, ErrorResponse, GenerateDocumentRequest};

/// User-facing messages; server-side details stay in the logs.
const MSG_REQUIRED_FIELDS: &str = "Campos 'prompt' e 'comoGerar' são obrigatórios.";
const MSG_GENERATION_FAILED: &str = "Erro ao gerar documento.";
const MSG_FILE_NOT_FOUND: &str = "Arquivo não encontrado.";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DocumentPipeline>,
    pub store: Arc<dyn ArtifactStore>,
    pub base_url: String,
    pub delivery: DeliveryMode,
}

impl AppState {
    pub fn new(
        pipeline: Arc<DocumentPipeline>,
        store: Arc<dyn ArtifactStore>,
        base_url: impl Into<String>,
        delivery: DeliveryMode,
    ) -> Self {
        Self {
            pipeline,
            store,
            base_url: base_url.into(),
            delivery,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST / - generate a document from a topic and an instruction.
///
/// Validation failures answer 400 before any AI or render call. On success
/// the response depends on the configured delivery mode: a download URL, or
/// the PDF itself as an attachment (deleted once its bytes are read).
pub async fn generate_document(
    State(state): State<AppState>,
    Json(body): Json<GenerateDocumentRequest>,
) -> Result<Response, ApiError> {
    let request = GenerationRequest::new(
        body.prompt.unwrap_or_default(),
        body.como_gerar.unwrap_or_default(),
    )
    .map_err(|_| ApiError::BadRequest(MSG_REQUIRED_FIELDS))?;

    let name = state.pipeline.run(&request).await.map_err(|e| {
        error!(topic = request.topic(), error = %e, "document generation failed");
        ApiError::Internal
    })?;

    match state.delivery {
        DeliveryMode::Url => {
            let url = format!("{}/download/{}", state.base_url, name);
            Ok(Json(DownloadUrlResponse { url }).into_response())
        }
        DeliveryMode::Inline => {
            let bytes = read_and_discard(&state, &name).await?;
            Ok(pdf_attachment(&name, bytes))
        }
    }
}

/// GET /download/:arquivo - fetch and delete a stored artifact.
///
/// Only mounted in URL delivery mode. Malformed names are answered 404 like
/// absent ones: a lookup never becomes a server error and never reveals
/// whether a name was invalid or merely gone.
pub async fn download_artifact(
    State(state): State<AppState>,
    Path(arquivo): Path<String>,
) -> Result<Response, ApiError> {
    let name =
        ArtifactName::parse(&arquivo).map_err(|_| ApiError::NotFound(MSG_FILE_NOT_FOUND))?;

    let bytes = read_and_discard(&state, &name).await?;
    Ok(pdf_attachment(&name, bytes))
}

/// Reads the artifact's bytes and deletes the file, success or failure.
async fn read_and_discard(state: &AppState, name: &ArtifactName) -> Result<Vec<u8>, ApiError> {
    let guard = state
        .store
        .acquire(name)
        .await
        .map_err(|e| {
            error!(artifact = %name, error = %e, "artifact lookup failed");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound(MSG_FILE_NOT_FOUND))?;

    // The guard deletes the file when it goes out of scope, even if the read
    // fails; a second fetch of the same name must 404 either way.
    guard.read().await.map_err(|e| {
        error!(artifact = %name, error = %e, "artifact read failed");
        ApiError::Internal
    })
}

/// Builds the binary PDF response with attachment headers.
fn pdf_attachment(name: &ArtifactName, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts pipeline failures to HTTP responses.
///
/// Internal failures deliberately carry no detail: the wire message is
/// generic and the cause lives in the logs only.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
