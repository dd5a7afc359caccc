use std::time::Instant;

use async_trait::async_trait;
use image_analysis_common::prompts::{build_system_prompt, MAX_TOKENS, MODEL, TEMPERATURE, USER_PROMPT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::VisionModel;
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{AppError, Result};

/// OpenRouter（OpenAI互換 chat completions）経由のモデル
pub struct OpenRouterModel {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    system_prompt: String,
}

impl OpenRouterModel {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            system_prompt: build_system_prompt(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone()).with_base_url(&config.base_url)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body<'a>(&'a self, image_url: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: USER_PROMPT },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image_url },
                        },
                    ]),
                },
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(&self.system_prompt),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// 応答本文から最初の選択肢のテキストを取り出す（空なら EmptyResponse）
fn first_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(AppError::EmptyResponse)
}

#[async_trait]
impl VisionModel for OpenRouterModel {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, image_url: &str) -> Result<String> {
        let start = Instant::now();
        debug!(model = MODEL, "OpenRouterへ送信");

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&self.request_body(image_url));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("{}: {}", status, body)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("応答の解析に失敗: {}", e)))?;

        let content = first_content(chat)?;
        info!(
            latency_ms = start.elapsed().as_millis() as u64,
            "OpenRouter応答受信"
        );
        Ok(content)
    }
}
