use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{LlmProvider, Message};

/// Local Ollama server, non-streaming `/api/chat`.
pub struct OllamaProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ReplyMessage>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            model,
            client: reqwest::Client::new(),
        }
    }

    fn request<'a>(&'a self, system_prompt: &'a str, messages: &'a [Message]) -> ChatRequest<'a> {
        let system = ChatMessage {
            role: "system",
            content: system_prompt,
        };
        let history = messages.iter().map(|msg| ChatMessage {
            role: &msg.role,
            content: &msg.content,
        });
        ChatRequest {
            model: &self.model,
            messages: std::iter::once(system).chain(history).collect(),
            stream: false,
            options: ChatOptions { temperature: 0.7 },
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        tracing::debug!(model = %self.model, turns = messages.len(), "calling Ollama chat");

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&self.request(system_prompt, messages))
            .send()
            .await
            .context("failed to call Ollama API")?;

        let status = resp.status();
        let data: ChatResponse = resp
            .json()
            .await
            .context("failed to parse Ollama response")?;

        if let Some(err) = data.error {
            anyhow::bail!("Ollama API error ({status}): {err}");
        }
        if !status.is_success() {
            anyhow::bail!("Ollama API error ({status})");
        }

        data.message
            .map(|m| m.content)
            .ok_or_else(|| anyhow::anyhow!("missing content in Ollama response"))
    }
}
