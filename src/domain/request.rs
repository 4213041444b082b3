//! Validated generation request.

use thiserror::Error;

use super::ArtifactName;

/// One caller request: a topic and an instruction describing how to generate
/// the document. Created per HTTP call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    instruction: String,
}

impl GenerationRequest {
    /// Validates and builds a request. Both fields must be non-blank.
    pub fn new(
        topic: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let topic = topic.into().trim().to_string();
        let instruction = instruction.into().trim().to_string();

        if topic.is_empty() {
            return Err(RequestError::MissingField("prompt"));
        }
        if instruction.is_empty() {
            return Err(RequestError::MissingField("comoGerar"));
        }

        Ok(Self { topic, instruction })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// The single prompt string sent to the text generator.
    pub fn composed_prompt(&self) -> String {
        format!("{}. {}", self.topic, self.instruction)
    }

    /// The deterministic artifact filename for this request's topic.
    pub fn artifact_name(&self) -> ArtifactName {
        ArtifactName::from_topic(&self.topic)
    }
}

/// Validation failures for inbound requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("required field '{0}' is missing or blank")]
    MissingField(&'static str),
}
