//! Ollama chat client (non-streaming).

use super::{ChatModel, ModelError};
use crate::domain::{ChatMessage, Config};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    host: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(host: &str, model: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        Self::new(&config.ollama_host, &config.model, config.timeout_secs)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.host, endpoint)
    }

    fn map_transport(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout { secs: self.timeout_secs }
        } else if err.is_connect() {
            ModelError::Unreachable { host: self.host.clone() }
        } else {
            ModelError::Transport(err.to_string())
        }
    }

    fn check_status(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        tracing::debug!("Model server answered {}: {}", status, body);
        Err(ModelError::Status { status: status.as_u16(), body: body.trim().to_string() })
    }

    fn decode<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<T, ModelError> {
        let text = response.text().map_err(|e| self.map_transport(e))?;
        serde_json::from_str(&text).map_err(|e| ModelError::InvalidResponse(e.to_string()))
    }
}

impl ChatModel for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn set_model(&mut self, model: &str) {
        self.model = model.trim().to_string();
    }

    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ModelError> {
        let request = ChatRequest { model: &self.model, messages, stream: false };
        tracing::debug!(
            "POST {} (model {}, {} messages)",
            self.url("chat"),
            self.model,
            messages.len()
        );

        let response = self
            .http
            .post(self.url("chat"))
            .json(&request)
            .send()
            .map_err(|e| self.map_transport(e))?;
        let reply: ChatResponse = self.decode(self.check_status(response)?)?;
        Ok(reply.message.content)
    }

    fn list_models(&self) -> Result<Vec<String>, ModelError> {
        let response =
            self.http.get(self.url("tags")).send().map_err(|e| self.map_transport(e))?;
        let tags: TagsResponse = self.decode(self.check_status(response)?)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn run_blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_chat_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"model": "tiny", "stream": false})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": {"role": "assistant", "content": "hi"}})),
            )
            .mount(&server)
            .await;

        let host = server.uri();
        let reply = run_blocking(move || {
            let client = OllamaClient::new(&host, "tiny", 5).unwrap();
            client.chat(&[ChatMessage::user("hello")])
        })
        .await;
        assert_eq!(reply.unwrap(), "hi");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_success_status_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let host = server.uri();
        let err = run_blocking(move || {
            OllamaClient::new(&host, "missing", 5).unwrap().chat(&[ChatMessage::user("x")])
        })
        .await
        .unwrap_err();
        match err {
            ModelError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "model not found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": {"content": "late"}}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let host = server.uri();
        let err = run_blocking(move || {
            OllamaClient::new(&host, "slow", 1).unwrap().chat(&[ChatMessage::user("x")])
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ModelError::Timeout { secs: 1 }), "got {err:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_models_and_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"models": [{"name": "qwen2.5-coder:7b"}, {"name": "llama3.2:latest"}]}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let host = server.uri();
        let (models, chat) = run_blocking(move || {
            let client = OllamaClient::new(&host, "m", 5).unwrap();
            (client.list_models(), client.chat(&[ChatMessage::user("x")]))
        })
        .await;
        assert_eq!(models.unwrap(), vec!["qwen2.5-coder:7b", "llama3.2:latest"]);
        assert!(matches!(chat, Err(ModelError::InvalidResponse(_))));
    }

    #[test]
    fn test_connection_refused_is_unreachable() {
        let client = OllamaClient::new("http://127.0.0.1:9/", "m", 5).unwrap();
        assert_eq!(client.host(), "http://127.0.0.1:9");
        let err = client.chat(&[ChatMessage::user("x")]).unwrap_err();
        assert!(matches!(err, ModelError::Unreachable { .. }), "got {err:?}");
    }

    #[test]
    fn test_set_model_rebinds() {
        let mut client = OllamaClient::new("http://localhost:11434", "a", 5).unwrap();
        client.set_model(" b ");
        assert_eq!(client.model_name(), "b");
    }
}
