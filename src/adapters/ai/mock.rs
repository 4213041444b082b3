//! Mock Text Generator - scripted TextGenerator for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{GenerationError, TextGenerator};

/// Scripted generator that replays queued responses and counts calls.
///
/// When the script runs out, further calls return the last configured
/// behavior repeated (or [`GenerationError::EmptyCompletion`] when the mock
/// was never scripted).
#[derive(Default)]
pub struct MockTextGenerator {
    script: Mutex<VecDeque<ScriptedResponse>>,
    repeat: Mutex<Option<ScriptedResponse>>,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Markdown(String),
    Failure(FailureKind),
}

#[derive(Debug, Clone, Copy)]
enum FailureKind {
    Unavailable,
    Empty,
}

impl MockTextGenerator {
    /// A generator that always returns the given Markdown.
    pub fn returning(markdown: impl Into<String>) -> Self {
        let mock = Self::default();
        *mock.repeat.lock().unwrap() = Some(ScriptedResponse::Markdown(markdown.into()));
        mock
    }

    /// A generator whose every call fails with a provider error.
    pub fn failing() -> Self {
        let mock = Self::default();
        *mock.repeat.lock().unwrap() = Some(ScriptedResponse::Failure(FailureKind::Unavailable));
        mock
    }

    /// A generator that returns blank completions.
    pub fn returning_empty() -> Self {
        let mock = Self::default();
        *mock.repeat.lock().unwrap() = Some(ScriptedResponse::Failure(FailureKind::Empty));
        mock
    }

    /// Queues one Markdown response ahead of the repeated behavior.
    pub fn enqueue_markdown(&self, markdown: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Markdown(markdown.into()));
    }

    /// Number of times `generate_markdown` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Option<ScriptedResponse> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.repeat.lock().unwrap().clone())
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_markdown(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.next_response() {
            Some(ScriptedResponse::Markdown(text)) => Ok(text),
            Some(ScriptedResponse::Failure(FailureKind::Unavailable)) => {
                Err(GenerationError::unavailable("mock provider failure"))
            }
            Some(ScriptedResponse::Failure(FailureKind::Empty)) | None => {
                Err(GenerationError::EmptyCompletion)
            }
        }
    }
}
