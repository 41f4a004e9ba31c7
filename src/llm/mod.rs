//! Model-server boundary.
//!
//! The rest of the crate talks to a [`ChatModel`]. Failures come back as a
//! [`ModelError`] whose variant tells the CLI which remedy to print.

use crate::domain::ChatMessage;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaClient;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot reach the model server at {host}")]
    Unreachable { host: String },
    #[error("model request timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("model server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response from the model server: {0}")]
    InvalidResponse(String),
    #[error("model request failed: {0}")]
    Transport(String),
}

impl ModelError {
    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self {
            ModelError::Unreachable { .. } => {
                "Is Ollama running? Start it with `ollama serve`, \
                 or set ollama_host in .local-agent/config.toml."
            }
            ModelError::Timeout { .. } => {
                "Try a smaller model, ask about fewer files, \
                 or raise timeout_secs in .local-agent/config.toml."
            }
            ModelError::Status { status: 404, .. } => {
                "The model may not be installed. Check `ollama list` and run `ollama pull <model>`."
            }
            ModelError::Status { .. } => "Check the Ollama server logs for details.",
            ModelError::InvalidResponse(_) => {
                "The server did not answer like the Ollama API. Check ollama_host."
            }
            ModelError::Transport(_) => "Check ollama_host and your network settings.",
        }
    }
}

pub trait ChatModel {
    fn model_name(&self) -> &str;

    /// Rebind to another model for subsequent requests.
    fn set_model(&mut self, model: &str);

    /// Send the whole conversation, return the assistant's reply.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ModelError>;

    fn list_models(&self) -> Result<Vec<String>, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_distinguishes_failure_kinds() {
        let unreachable = ModelError::Unreachable { host: "http://x".into() };
        let timeout = ModelError::Timeout { secs: 5 };
        let missing = ModelError::Status { status: 404, body: String::new() };
        let server = ModelError::Status { status: 500, body: String::new() };

        assert!(unreachable.hint().contains("ollama serve"));
        assert!(timeout.hint().contains("timeout_secs"));
        assert!(missing.hint().contains("ollama pull"));
        assert_ne!(missing.hint(), server.hint());
        assert_eq!(timeout.to_string(), "model request timed out after 5s");
    }
}
