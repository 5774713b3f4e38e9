// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Variants group into the categories surfaced to clients:
///
/// - unauthenticated (401): `MissingAuthHeader`, `InvalidAuthHeader`
/// - invalid token (401): signature, algorithm, expiry, issuer, audience, key lookup
/// - `EmailNotVerified` (403)
/// - `Forbidden` (403): access policy denial
/// - `JwksUnavailable` (503): the key set could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Header present but not `Bearer <token>`
    InvalidAuthHeader,
    /// Token is not a decodable JWT
    MalformedToken,
    /// Token signature does not verify against the selected key
    InvalidSignature,
    /// Token `alg` is not the configured one, or the key cannot serve it
    AlgorithmMismatch,
    /// Token has expired
    TokenExpired,
    /// Token is not yet valid (`nbf`)
    TokenNotYetValid,
    /// Token issuer is not the configured auth provider
    InvalidIssuer,
    /// Token audience is invalid
    InvalidAudience,
    /// No key in the JWKS matches the token
    NoMatchingKey,
    /// Verified identity has no confirmed email
    EmailNotVerified,
    /// Access policy denied the request
    Forbidden(String),
    /// JWKS fetch failed
    JwksUnavailable(String),
    /// Internal error
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::AlgorithmMismatch => "algorithm_mismatch",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::NoMatchingKey => "no_matching_key",
            AuthError::EmailNotVerified => "email_not_verified",
            AuthError::Forbidden(_) => "forbidden",
            AuthError::JwksUnavailable(_) => "jwks_unavailable",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                StatusCode::UNAUTHORIZED
            }
            e if e.is_invalid_token() => StatusCode::UNAUTHORIZED,
            AuthError::EmailNotVerified | AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::JwksUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for every failure of signature, algorithm, time, issuer,
    /// audience, or key lookup checks.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken
                | AuthError::InvalidSignature
                | AuthError::AlgorithmMismatch
                | AuthError::TokenExpired
                | AuthError::TokenNotYetValid
                | AuthError::InvalidIssuer
                | AuthError::InvalidAudience
                | AuthError::NoMatchingKey
        )
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Not authenticated"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Invalid token"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::AlgorithmMismatch => write!(f, "Token signing algorithm is not accepted"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            AuthError::InvalidIssuer => write!(f, "Invalid token issuer"),
            AuthError::InvalidAudience => write!(f, "Token audience is invalid"),
            AuthError::NoMatchingKey => write!(f, "No matching key found in JWKS"),
            AuthError::EmailNotVerified => write!(f, "Email not verified"),
            AuthError::Forbidden(msg) => write!(f, "{msg}"),
            AuthError::JwksUnavailable(msg) => {
                write!(f, "Authentication keys unavailable: {msg}")
            }
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
