//! # Language-Model Clients
//!
//! Transport for the assisted generation path. A [`TimetableModel`] turns a
//! system instruction and a prompt into the raw text of the model's reply;
//! checking that reply is left to `timetablegen_core::external`.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::{ModelConfig, ModelService};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A backend that completes a timetable prompt
#[async_trait]
pub trait TimetableModel: Send + Sync {
    /// Sends `prompt` under the `system` instruction and returns the reply text unchanged
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Builds the client for the configured service
pub fn client_from_config(config: &ModelConfig, timeout: Duration) -> Result<Arc<dyn TimetableModel>> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let client: Arc<dyn TimetableModel> = match config.service {
        ModelService::OpenAi => Arc::new(OpenAiClient {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }),
        ModelService::Gemini => Arc::new(GeminiClient {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }),
    };
    Ok(client)
}

/// Chat-completions client
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait]
impl TimetableModel for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "requesting chat completion");
        let body = json!({
            "model": self.model,
            "messages": [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
        });

        let response: ChatResponse = self
            .http
            .post(OPENAI_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .wrap_err("OpenAI request failed")?
            .error_for_status()
            .wrap_err("OpenAI returned an error status")?
            .json()
            .await
            .wrap_err("OpenAI response could not be decoded")?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

/// generateContent client
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TimetableModel for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        debug!(model = %self.model, "requesting content generation");
        let url = format!("{}/{}:generateContent", GEMINI_URL, self.model);
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response: GeminiResponse = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .wrap_err("Gemini request failed")?
            .error_for_status()
            .wrap_err("Gemini returned an error status")?
            .json()
            .await
            .wrap_err("Gemini response could not be decoded")?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("Gemini returned no candidates"))?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect())
    }
}
