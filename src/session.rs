//! Interactive chat state: the running history and the bound model.

use crate::domain::ChatMessage;
use crate::llm::{ChatModel, ModelError};

/// Owned by the chat loop; lives for one process only.
pub struct ChatSession<M: ChatModel> {
    model: M,
    system_prompt: String,
    history: Vec<ChatMessage>,
}

impl<M: ChatModel> ChatSession<M> {
    pub fn new(model: M, system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        let history = vec![ChatMessage::system(system_prompt.clone())];
        Self { model, system_prompt, history }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Append a user turn and ask the model about the whole history.
    ///
    /// A failed request leaves the history as it was before the call.
    pub fn send(&mut self, user_turn: impl Into<String>) -> Result<String, ModelError> {
        self.history.push(ChatMessage::user(user_turn));
        match self.model.chat(&self.history) {
            Ok(reply) => {
                self.history.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }

    /// Record a turn answered without the model, such as a quote lookup.
    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.history.push(ChatMessage::user(question));
        self.history.push(ChatMessage::assistant(answer));
    }

    /// Drop everything but the system prompt.
    pub fn clear(&mut self) {
        self.history.clear();
        self.history.push(ChatMessage::system(self.system_prompt.clone()));
    }

    pub fn switch_model(&mut self, name: &str) {
        tracing::debug!("Switching model {} -> {}", self.model.model_name(), name);
        self.model.set_model(name);
    }
}
