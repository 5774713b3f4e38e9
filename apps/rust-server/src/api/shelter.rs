// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shelter dashboard endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::{authorize, Auth, Capability},
    error::ApiError,
    models::ShelterAnalyticsResponse,
    prompts,
    state::AppState,
};

/// Reported until application outcomes are tracked.
pub const BASELINE_MATCH_RATE: f64 = 0.65;

/// Listing-quality suggestions based on the shelter's most recent pets.
#[utoipa::path(
    get,
    path = "/shelter/analytics",
    tag = "Shelter",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Analytics", body = ShelterAnalyticsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only shelters can view analytics"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn shelter_analytics(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<ShelterAnalyticsResponse>, ApiError> {
    authorize(&user, Capability::ShelterOnly, "Only shelters can view analytics")?;

    let pets = state.store.pets_by_shelter(&user.user_id).await?;
    let descriptions: Vec<&str> = pets
        .iter()
        .filter_map(|pet| pet.description.as_deref())
        .filter(|d| !d.trim().is_empty())
        .collect();

    let suggestions = if descriptions.is_empty() {
        prompts::NO_LISTINGS_SUGGESTION.to_string()
    } else {
        state
            .chat
            .complete(&prompts::shelter_analytics(&descriptions))
            .await?
    };

    Ok(Json(ShelterAnalyticsResponse {
        match_rate: BASELINE_MATCH_RATE,
        suggestions,
    }))
}
