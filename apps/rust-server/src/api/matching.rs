// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Matching and adoption application endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        ApplicationRequest, ApplicationStatus, MatchesQuery, NewApplication, SuccessResponse,
    },
    state::AppState,
};

pub const DEFAULT_MATCH_LIMIT: u32 = 10;
pub const MAX_MATCH_LIMIT: u32 = 50;

/// Pets ranked by similarity to the caller's lifestyle vector.
///
/// The vector is read on every call, so results follow the latest profile
/// update. Requires a lifestyle profile.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "Matching",
    security(("bearer_auth" = [])),
    params(MatchesQuery),
    responses(
        (status = 200, description = "Ranked pets, best match first"),
        (status = 400, description = "No lifestyle profile yet"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn get_matches(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(query): Query<MatchesQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MATCH_LIMIT)
        .clamp(1, MAX_MATCH_LIMIT);

    let vector = state
        .store
        .lifestyle_vector(&user.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::precondition_failed("Set your lifestyle profile before requesting matches")
        })?;

    let matches = state.store.match_pets(&vector, limit).await?;
    Ok(Json(matches))
}

/// Apply to adopt a pet. Applications start as `pending`.
#[utoipa::path(
    post,
    path = "/applications",
    tag = "Matching",
    security(("bearer_auth" = [])),
    request_body = ApplicationRequest,
    responses(
        (status = 200, description = "Application submitted", body = SuccessResponse),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upstream service failed"),
        (status = 503, description = "Upstream service unavailable")
    )
)]
pub async fn submit_application(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let application = NewApplication {
        pet_id: request.pet_id,
        user_id: user.user_id,
        status: ApplicationStatus::Pending,
    };
    state.store.insert_application(&application).await?;

    tracing::info!(
        user_id = %application.user_id,
        pet_id = %application.pet_id,
        "Submitted adoption application"
    );
    Ok(Json(SuccessResponse::ok()))
}
