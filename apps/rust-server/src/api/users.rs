// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, AuthenticatedUser};

/// Response for GET /auth/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// Supabase user ID (`sub`)
    pub user_id: String,
    /// `app_metadata.user_type`, if assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<AuthenticatedUser> for UserMeResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            user_type: user.user_type.map(|t| t.to_string()),
            email: user.email,
        }
    }
}

/// Get the current authenticated user's information.
///
/// Useful to check that a token passes verification.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User information", body = UserMeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Email not verified"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<UserMeResponse> {
    Json(user.into())
}
