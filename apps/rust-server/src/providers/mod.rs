// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External service adapters.
//!
//! Handlers depend on the traits here, never on a concrete client:
//!
//! - [`Store`] - Supabase PostgREST tables plus the `match_pets` RPC
//! - [`Embedder`] - text to fixed-length vector
//! - [`ChatModel`] - prompt to text
//!
//! Each call is a single round trip bounded by the client timeout. Nothing
//! is retried here; failures surface as [`UpstreamError`].

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Embedding, NewApplication, NewPet, Pet, PetSummary};

pub mod openai;
pub mod supabase;

pub use openai::OpenAiClient;
pub use supabase::SupabaseStore;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} is unreachable: {message}")]
    Unreachable {
        service: &'static str,
        message: String,
    },

    #[error("{service} did not respond in time")]
    Timeout { service: &'static str },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response was invalid: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable { service, .. }
            | UpstreamError::Timeout { service }
            | UpstreamError::Status { service, .. }
            | UpstreamError::InvalidResponse { service, .. } => *service,
        }
    }

    /// True when the service could not be reached at all (as opposed to
    /// answering with something unusable).
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Unreachable { .. } | UpstreamError::Timeout { .. }
        )
    }

    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { service }
        } else if err.is_decode() {
            UpstreamError::InvalidResponse {
                service,
                message: err.to_string(),
            }
        } else {
            UpstreamError::Unreachable {
                service,
                message: err.to_string(),
            }
        }
    }

    /// Turn a non-2xx response into an error, keeping a bounded excerpt of the body.
    pub(crate) async fn check_status(
        service: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(512)
            .collect();
        tracing::warn!(service, status = status.as_u16(), "Upstream returned an error status");
        Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
            body,
        })
    }
}

/// Persistence operations backed by the managed database.
#[async_trait]
pub trait Store: Send + Sync {
    /// Write the adopter's lifestyle text and its embedding to their profile.
    ///
    /// Returns `false` when the user has no profile row to update.
    async fn update_lifestyle(
        &self,
        user_id: &str,
        text: &str,
        vector: &Embedding,
    ) -> Result<bool, UpstreamError>;

    /// Insert a pet listing and return the created row as stored.
    async fn insert_pet(&self, pet: &NewPet) -> Result<Value, UpstreamError>;

    /// The caller's stored lifestyle vector, if any.
    async fn lifestyle_vector(&self, user_id: &str) -> Result<Option<Embedding>, UpstreamError>;

    /// The caller's stored lifestyle text, if any.
    async fn lifestyle_text(&self, user_id: &str) -> Result<Option<String>, UpstreamError>;

    /// Server-side similarity search over available pets, best match first.
    async fn match_pets(&self, query: &Embedding, limit: u32) -> Result<Vec<Value>, UpstreamError>;

    async fn insert_application(&self, application: &NewApplication) -> Result<(), UpstreamError>;

    async fn get_pet(&self, pet_id: Uuid) -> Result<Option<Pet>, UpstreamError>;

    /// Listings owned by a shelter, in store order.
    async fn pets_by_shelter(&self, shelter_id: &str) -> Result<Vec<PetSummary>, UpstreamError>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, UpstreamError>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Single-turn completion of a user prompt.
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}
