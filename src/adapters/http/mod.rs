//! HTTP adapter - axum routes, handlers and wire DTOs.

mod dto;
mod handlers;
mod routes;

pub use dto::{DownloadUrlResponse, ErrorResponse, GenerateDocumentRequest};
pub use handlers::{download_artifact, generate_document, ApiError, AppState};
pub use routes::app_router;
