// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pet listing endpoints (shelters only).

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::{
    auth::{authorize, Auth, Capability},
    error::ApiError,
    models::{CreatePetRequest, NewPet, PetStatus},
    state::AppState,
};

/// Publish a new pet listing.
///
/// The traits description is embedded for matching. New listings start as
/// `available`; the response is the row as stored.
#[utoipa::path(
    post,
    path = "/pets",
    tag = "Pets",
    security(("bearer_auth" = [])),
    request_body = CreatePetRequest,
    responses(
        (status = 201, description = "Created pet row as stored"),
        (status = 400, description = "Name or species missing"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only shelters can add pets"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn create_pet(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if request.name.trim().is_empty() || request.species.trim().is_empty() {
        return Err(ApiError::bad_request("Pet name and species are required"));
    }
    authorize(&user, Capability::ShelterOnly, "Only shelters can add pets")?;

    let trait_vector = state.embedder.embed(&request.traits_description).await?;
    let pet = NewPet {
        shelter_id: user.user_id.clone(),
        name: request.name,
        species: request.species,
        description: request.description,
        traits_text: request.traits_description,
        trait_vector,
        status: PetStatus::Available,
    };
    let created = state.store.insert_pet(&pet).await?;

    tracing::info!(shelter_id = %user.user_id, pet_id = %created["id"], "Created pet listing");
    Ok((StatusCode::CREATED, Json(created)))
}
