// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LLM-backed adopter endpoints: compatibility report, Q&A chat, and care
//! roadmap. Each makes exactly one chat completion call.

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        CareRoadmapRequest, CareRoadmapResponse, ChatRequest, ChatResponse,
        CompatibilityReportResponse, CompatibilityRequest, Pet,
    },
    prompts,
    state::AppState,
};

async fn load_pet(state: &AppState, pet_id: Uuid) -> Result<Pet, ApiError> {
    state
        .store
        .get_pet(pet_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Pet not found"))
}

/// Explain why a pet suits the caller's lifestyle.
#[utoipa::path(
    post,
    path = "/compatibility-report",
    tag = "Assistant",
    security(("bearer_auth" = [])),
    request_body = CompatibilityRequest,
    responses(
        (status = 200, description = "Compatibility report", body = CompatibilityReportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pet not found"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn compatibility_report(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<CompatibilityReportResponse>, ApiError> {
    let pet = load_pet(&state, request.pet_id).await?;
    let lifestyle = state
        .store
        .lifestyle_text(&user.user_id)
        .await?
        .unwrap_or_else(|| prompts::MISSING_LIFESTYLE.to_string());

    let report = state
        .chat
        .complete(&prompts::compatibility_report(&lifestyle, &pet))
        .await?;
    Ok(Json(CompatibilityReportResponse { report }))
}

/// Answer an adoption question, optionally about a specific pet.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Assistant",
    security(("bearer_auth" = [])),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer", body = ChatResponse),
        (status = 400, description = "Question missing"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pet not found"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn chat(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("Question is required"));
    }

    let pet = match request.pet_id {
        Some(pet_id) => Some(load_pet(&state, pet_id).await?),
        None => None,
    };

    let answer = state
        .chat
        .complete(&prompts::chat(&request.question, pet.as_ref()))
        .await?;
    Ok(Json(ChatResponse { answer }))
}

/// 30-60-90 day care plan for the pet's species.
#[utoipa::path(
    post,
    path = "/care-roadmap",
    tag = "Assistant",
    security(("bearer_auth" = [])),
    request_body = CareRoadmapRequest,
    responses(
        (status = 200, description = "Care roadmap", body = CareRoadmapResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pet not found"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn care_roadmap(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CareRoadmapRequest>,
) -> Result<Json<CareRoadmapResponse>, ApiError> {
    let pet = load_pet(&state, request.pet_id).await?;
    let roadmap = state
        .chat
        .complete(&prompts::care_roadmap(&pet.species))
        .await?;
    Ok(Json(CareRoadmapResponse { roadmap }))
}
