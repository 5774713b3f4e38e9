// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OpenAI-compatible embeddings and chat completions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatModel, Embedder, UpstreamError};
use crate::models::{Embedding, EMBEDDING_DIMENSIONS};

const SERVICE: &str = "openai";

#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
    http: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        embedding_model: impl Into<String>,
        chat_model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            embedding_model: embedding_model.into(),
            chat_model: chat_model.into(),
            http,
        })
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        UpstreamError::check_status(SERVICE, response)
            .await?
            .json::<R>()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    /// Blank text embeds to the zero vector without a provider call.
    async fn embed(&self, text: &str) -> Result<Embedding, UpstreamError> {
        if text.trim().is_empty() {
            return Ok(Embedding::zeros(EMBEDDING_DIMENSIONS));
        }

        let response: EmbeddingResponse = self
            .post(
                "embeddings",
                &EmbeddingRequest {
                    model: &self.embedding_model,
                    input: text,
                },
            )
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| Embedding(d.embedding))
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE,
                message: "embedding response had no data".to_string(),
            })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let response: ChatResponse = self
            .post(
                "chat/completions",
                &ChatRequest {
                    model: &self.chat_model,
                    messages: [ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                },
            )
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE,
                message: "completion had no content".to_string(),
            })
    }
}
