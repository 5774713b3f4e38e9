// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Runs the full [`TokenValidator`](super::TokenValidator) pipeline on the
/// `Authorization` header. Rejection is an [`AuthError`] response
/// (401/403/503).
///
/// # Example
///
/// ```rust,ignore
/// async fn submit_application(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<SuccessResponse>, ApiError> {
///     // user.user_id contains the authenticated user's ID
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?),
            None => None,
        };

        match state.auth.authenticate(header).await {
            Ok(user) => Ok(Auth(user)),
            Err(err) => {
                tracing::debug!(
                    error_code = err.error_code(),
                    path = %parts.uri.path(),
                    "Authentication failed"
                );
                Err(err)
            }
        }
    }
}
