//! Ollama HTTP client and the analyzer built on top of it.
//!
//! This module provides a small client for the Ollama chat completion API
//! and the `OllamaAnalyzer`, which turns journal content into a structured
//! `MoodAnalysis` by prompting a local model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::analysis::parse_analysis;
use crate::ai::prompts;
use crate::ai::MoodAnalyzer;
use crate::errors::AnalysisError;
use crate::journal::MoodAnalysis;

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender (system, user, assistant)
    pub role: String,
    /// The content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for chat completion.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

/// Response from chat completion.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Message,
}

/// Client for interacting with the Ollama API.
pub struct OllamaClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OllamaClient {
    /// Creates a new Ollama client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Ollama API (e.g., "http://127.0.0.1:11434")
    /// * `timeout` - Per-request timeout; a slow model counts as offline
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: Client::new(),
        }
    }

    /// Sends a chat completion request and returns the assistant's reply.
    ///
    /// # Arguments
    ///
    /// * `model` - Name of the chat model (e.g., "llama3.2:3b")
    /// * `messages` - Conversation messages
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Ollama API is not reachable or the request times out
    /// - Model is not found
    /// - API returns an error response
    pub async fn chat(&self, model: &str, messages: &[Message]) -> Result<String, AnalysisError> {
        debug!("Sending chat request with model: {}", model);

        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(AnalysisError::Offline)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AnalysisError::ModelNotFound(model.to_string()));
            }

            return Err(AnalysisError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            AnalysisError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;

        debug!("Received chat response");
        Ok(chat_response.message.content)
    }
}

/// Mood analyzer backed by an Ollama chat model.
pub struct OllamaAnalyzer {
    client: OllamaClient,
    model: String,
}

impl OllamaAnalyzer {
    /// Creates an analyzer that talks to the given Ollama instance.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: OllamaClient::new(base_url, timeout),
            model: model.into(),
        }
    }
}

#[async_trait]
impl MoodAnalyzer for OllamaAnalyzer {
    async fn analyze(&self, content: &str) -> Result<MoodAnalysis, AnalysisError> {
        let messages = prompts::build_analysis_messages(content);
        let reply = self.client.chat(&self.model, &messages).await?;
        parse_analysis(&reply)
    }
}
