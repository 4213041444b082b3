//! AI adapters implementing the [`TextGenerator`](crate::ports::TextGenerator) port.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use mock::MockTextGenerator;
