// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Adopter profile endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{SuccessResponse, UpdateLifestyleRequest},
    state::AppState,
};

/// Set the caller's lifestyle description.
///
/// The text is embedded and stored with the profile; matching uses the
/// stored vector. An empty description stores the zero vector.
#[utoipa::path(
    post,
    path = "/profile/lifestyle",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateLifestyleRequest,
    responses(
        (status = 200, description = "Profile updated", body = SuccessResponse),
        (status = 400, description = "Caller has no profile row"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Email not verified"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn update_lifestyle(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<UpdateLifestyleRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let vector = state.embedder.embed(&request.lifestyle_description).await?;
    let updated = state
        .store
        .update_lifestyle(&user.user_id, &request.lifestyle_description, &vector)
        .await?;
    if !updated {
        tracing::warn!(user_id = %user.user_id, "No profile row to update");
        return Err(ApiError::precondition_failed("Profile not found"));
    }

    tracing::info!(user_id = %user.user_id, "Updated lifestyle profile");
    Ok(Json(SuccessResponse::ok()))
}
