use common::config::OpenAiConfig;
use common::{CrawlerError, CrawlerResult};
use reqwest::Client;
use tracing::debug;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

const SYSTEM_PROMPT: &str = "You are a blogger.";

pub fn blog_prompt(topic: &str) -> String {
    format!("Write a short blog post about '{}'.", topic)
}

/// Minimal chat-completion client for the blog prompt.
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatClient {
    pub fn new(api_key: &str, config: &OpenAiConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub async fn write_post(&self, topic: &str) -> CrawlerResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(blog_prompt(topic))],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Requesting completion from {} for '{}'", url, topic);
        let res = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(CrawlerError::Api(format!("Request failed: {} - {}", status, text)));
        }

        let resp: ChatCompletionResponse = res.json().await?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CrawlerError::Parse("completion returned no content".to_string()))
    }
}
