//! Wire DTOs for the HTTP interface.
//!
//! Field names are part of the external contract: the request body carries
//! `prompt` and `comoGerar`, error payloads carry `erro`.

use serde::{Deserialize, Serialize};

/// Body of `POST /`.
///
/// Both fields are required; they are optional here so that missing fields
/// reach the handler and produce the contract's `400 { "erro": ... }` payload
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct GenerateDocumentRequest {
    /// Topic of the document to generate.
    pub prompt: Option<String>,

    /// Instruction describing how to generate it.
    #[serde(rename = "comoGerar")]
    pub como_gerar: Option<String>,
}

/// Success body of `POST /` in URL delivery mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadUrlResponse {
    pub url: String,
}

/// Error body shared by all failure responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub erro: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            erro: message.into(),
        }
    }
}
