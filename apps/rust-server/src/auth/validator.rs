// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification.
//!
//! Every token goes through the same four checks, in order:
//!
//! 1. `Authorization` header is `Bearer <token>`
//! 2. Header `alg` equals the configured asymmetric algorithm and the
//!    signature verifies against the JWKS key named by `kid`; `exp`/`nbf`
//!    are enforced with 60 seconds of leeway
//! 3. `iss` equals the configured issuer (and `aud`, when configured)
//! 4. `email_verified_at` (or `email_confirmed_at`) holds a timestamp
//!
//! There is no code path that decodes claims without verifying them.

use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, Validation};

use super::{claims::IdentityClaims, AuthError, AuthenticatedUser, JwksManager};
use crate::config::AuthSettings;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies Supabase access tokens against the project's JWKS.
#[derive(Clone)]
pub struct TokenValidator {
    jwks: JwksManager,
    issuer: String,
    audience: Option<String>,
    algorithm: Algorithm,
}

impl TokenValidator {
    pub fn new(jwks: JwksManager, issuer: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            jwks,
            issuer: issuer.into(),
            audience: None,
            algorithm,
        }
    }

    /// Build from [`AuthSettings`], with a JWKS cache using the configured TTL.
    pub fn from_settings(settings: &AuthSettings) -> Self {
        let jwks = JwksManager::new(settings.jwks_url.clone()).with_cache_ttl(settings.jwks_cache_ttl);
        let validator = Self::new(jwks, settings.issuer.clone(), settings.algorithm);
        match &settings.audience {
            Some(aud) => validator.with_audience(aud.clone()),
            None => validator,
        }
    }

    /// Set the expected audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn jwks(&self) -> &JwksManager {
        &self.jwks
    }

    /// Validate a raw `Authorization` header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let header = header.ok_or(AuthError::MissingAuthHeader)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = self.verify(token).await?;
        AuthenticatedUser::from_claims(claims)
    }

    /// Verify signature, algorithm, lifetime, and issuer; return the claims.
    pub async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        if header.alg != self.algorithm {
            return Err(AuthError::AlgorithmMismatch);
        }

        let decoding_key = self
            .jwks
            .decoding_key(header.kid.as_deref(), self.algorithm)
            .await?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        let token_data = decode::<IdentityClaims>(token, &decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                ErrorKind::InvalidAudience => AuthError::InvalidAudience,
                ErrorKind::InvalidAlgorithm => AuthError::AlgorithmMismatch,
                _ => AuthError::MalformedToken,
            },
        )?;

        Ok(token_data.claims)
    }
}
