//! OpenAI-compatible chat completion client.
//!
//! Talks to any endpoint that accepts the OpenAI `/chat/completions` request
//! shape (llama.cpp server, LM Studio, vLLM, OpenAI itself). Non-streaming:
//! one request, one reply. Transient failures are retried with exponential
//! backoff below the conversation layer, so a retry never duplicates history
//! entries.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use serde_json::{json, Value};

use reflect_core::Message;

use crate::provider::{CompletionClient, CompletionError, Result};

/// The seven generation knobs, passed through verbatim to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            frequency_penalty: 0.5,
            presence_penalty: 0.0,
        }
    }
}

pub struct OpenAiCompatClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
    model: String,
    params: GenerationParams,
}

impl OpenAiCompatClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    fn build_body(&self, messages: &[Message]) -> Value {
        json!({
            "model": self.model,
            "messages": messages_to_wire_json(messages),
            "max_tokens": self.params.max_tokens,
            "temperature": self.params.temperature,
            "top_p": self.params.top_p,
            "top_k": self.params.top_k,
            "frequency_penalty": self.params.frequency_penalty,
            "presence_penalty": self.params.presence_penalty,
        })
    }
}

/// Convert internal [`Message`] values to the wire `messages` array.
///
/// This intentionally omits internal fields like `id` and `created_at`.
fn messages_to_wire_json(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| {
            json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: ChatChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let body = self.build_body(messages);
        log::debug!(
            "POST {}/chat/completions with {} message(s)",
            self.base_url,
            messages.len()
        );

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflect_core::Role;

    #[test]
    fn wire_json_omits_internal_fields() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let wire = messages_to_wire_json(&messages);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0]["role"], "system");
        assert_eq!(wire[1]["content"], "hi");
        assert!(wire[0].get("id").is_none());
        assert!(wire[0].get("created_at").is_none());
    }

    #[test]
    fn body_carries_all_generation_params() {
        let client = OpenAiCompatClient::new("http://localhost:1234/v1", "test-model");
        let body = client.build_body(&[Message::user("q")]);

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["top_k"], 40);
        assert!((body["frequency_penalty"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
