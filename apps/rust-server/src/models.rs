// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API, plus the row shapes written
//! to and read from the store. API types derive `ToSchema` for the OpenAPI
//! document.
//!
//! ## Model Categories
//!
//! - **Embeddings**: the [`Embedding`] vector type shared by profiles and pets
//! - **Profiles**: adopter lifestyle description
//! - **Pets**: listings published by shelters
//! - **Applications**: adoption requests
//! - **AI**: compatibility report, chat, care roadmap, shelter analytics

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// =============================================================================
// Embeddings
// =============================================================================

/// Dimension of `text-embedding-3-small` vectors and of the pgvector columns.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// A dense embedding vector.
///
/// Serializes as a JSON array. Deserializes from either a JSON array or the
/// pgvector text form (`"[0.1,0.2,...]"`) PostgREST returns for `vector`
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    pub fn zeros(dimensions: usize) -> Self {
        Embedding(vec![0.0; dimensions])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(value: Vec<f32>) -> Self {
        Embedding(value)
    }
}

impl<'de> Deserialize<'de> for Embedding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Array(Vec<f32>),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Array(values) => Ok(Embedding(values)),
            Repr::Text(text) => parse_pgvector(&text).map(Embedding).map_err(de::Error::custom),
        }
    }
}

fn parse_pgvector(text: &str) -> Result<Vec<f32>, String> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| format!("not a vector literal: {text:.32}"))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid vector component '{part}': {e}"))
        })
        .collect()
}

// =============================================================================
// Profile Models
// =============================================================================

/// Request to set the adopter's lifestyle description.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLifestyleRequest {
    /// Free-text description of home, schedule, activity level, other pets...
    pub lifestyle_description: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// =============================================================================
// Pet Models
// =============================================================================

/// Lifecycle state of a pet listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
}

/// Request to publish a new pet listing (shelters only).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePetRequest {
    pub name: String,
    /// e.g. "dog", "cat", "rabbit"
    pub species: String,
    pub description: String,
    /// Temperament and needs; embedded for matching.
    pub traits_description: String,
}

/// Row inserted into `pets`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPet {
    pub shelter_id: String,
    pub name: String,
    pub species: String,
    pub description: String,
    pub traits_text: String,
    pub trait_vector: Embedding,
    pub status: PetStatus,
}

/// Row read from `pets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Remaining columns (id, shelter_id, status, vectors...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Projection of `pets` used by shelter analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetSummary {
    pub id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Matching & Application Models
// =============================================================================

/// Query parameters for GET /matches.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchesQuery {
    /// Maximum number of matches (1-50, default 10).
    pub limit: Option<u32>,
}

/// Request to apply for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationRequest {
    pub pet_id: Uuid,
}

/// Lifecycle state of an adoption application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
}

/// Row inserted into `applications`.
#[derive(Debug, Clone, Serialize)]
pub struct NewApplication {
    pub pet_id: Uuid,
    pub user_id: String,
    pub status: ApplicationStatus,
}

// =============================================================================
// AI Models
// =============================================================================

/// Request a compatibility explanation for one pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompatibilityRequest {
    pub pet_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CompatibilityReportResponse {
    pub report: String,
}

/// Free-form adoption question, optionally about a specific pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub pet_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}

/// Request a post-adoption care plan for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CareRoadmapRequest {
    pub pet_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CareRoadmapResponse {
    pub roadmap: String,
}

/// Listing-quality feedback for a shelter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShelterAnalyticsResponse {
    pub match_rate: f64,
    pub suggestions: String,
}
