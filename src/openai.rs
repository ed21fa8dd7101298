//! Chat-completions client for post and caption generation.
//!
//! One blocking request per call, no retry. The response text is handed to
//! [`Post::from_model_response`] for posts and returned trimmed for captions.

use crate::config::PublishConfig;
use crate::post::Post;
use crate::prompt::{caption_prompt, post_prompt};
use crate::publish::{ContentGenerator, GenerateError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// First non-blank message content of a chat response.
fn extract_content(response: ChatResponse) -> Result<String, GenerateError> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .find(|content| !content.trim().is_empty())
        .ok_or(GenerateError::EmptyResponse)
}

fn endpoint(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

/// [`ContentGenerator`] backed by an OpenAI-compatible chat API.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    pub fn new(config: &PublishConfig, api_key: &str) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: endpoint(&config.api_base),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        log::debug!("POST {} ({})", self.endpoint, self.model);
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| GenerateError::Http(format!("Failed to reach {}: {e}", self.endpoint)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| GenerateError::Http(format!("Failed to read response body: {e}")))?;
        extract_content(parsed)
    }
}

impl ContentGenerator for OpenAiGenerator {
    fn generate_post(&self, category: &str) -> Result<Post, GenerateError> {
        let content = self.complete(&post_prompt(category))?;
        Ok(Post::from_model_response(&content)?)
    }

    fn create_caption(&self, post: &Post) -> Result<String, GenerateError> {
        Ok(self.complete(&caption_prompt(post))?.trim().to_string())
    }
}
