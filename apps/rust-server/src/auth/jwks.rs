// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Cache lifecycle
//!
//! - Starts empty; the first [`JwksManager::get`] fetches synchronously
//! - A cached set younger than the TTL (default one hour) is always served
//! - On expiry the next caller refetches; concurrent callers wait on the
//!   same refresh instead of issuing their own
//! - A failed fetch is an error for the request. There is no fallback to
//!   unverified trust and no fallback to an expired set.
//! - For a short backoff after a failed fetch, callers get that failure
//!   instead of fetching again, so an outage costs one fetch per backoff.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{Algorithm, DecodingKey};
use tokio::sync::{Mutex, RwLock};

use super::error::AuthError;
use crate::config::DEFAULT_JWKS_CACHE_TTL;

/// Timeout for the JWKS request itself.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a failed fetch is replayed before the next attempt.
const DEFAULT_FAILURE_BACKOFF: Duration = Duration::from_secs(5);

/// JWKS cache entry.
struct CacheEntry {
    jwks: Arc<JwkSet>,
    fetched_at: Instant,
}

/// Most recent failed fetch.
struct Failure {
    at: Instant,
    error: AuthError,
}

/// JWKS manager with caching.
///
/// Cloning is cheap; clones share the cache.
#[derive(Clone)]
pub struct JwksManager {
    /// JWKS URL (`{SUPABASE_URL}/auth/v1/.well-known/jwks.json`)
    jwks_url: String,
    cache_ttl: Duration,
    failure_backoff: Duration,
    cache: Arc<RwLock<Option<CacheEntry>>>,
    /// Held while a fetch is in flight; remembers the last failure
    refresh_lock: Arc<Mutex<Option<Failure>>>,
    client: reqwest::Client,
}

impl JwksManager {
    /// Create a new JWKS manager with the default one hour TTL.
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_JWKS_CACHE_TTL,
            failure_backoff: DEFAULT_FAILURE_BACKOFF,
            cache: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(None)),
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create with custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set how long a failed fetch is replayed to later callers.
    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Current key set, fetched if the cache is empty or expired.
    pub async fn get(&self) -> Result<Arc<JwkSet>, AuthError> {
        if let Some(jwks) = self.cached().await {
            return Ok(jwks);
        }

        let mut last_failure = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(jwks) = self.cached().await {
            return Ok(jwks);
        }

        if let Some(failure) = last_failure
            .as_ref()
            .filter(|f| f.at.elapsed() < self.failure_backoff)
        {
            return Err(failure.error.clone());
        }

        self.refresh_locked(&mut last_failure).await
    }

    /// Force refresh the JWKS cache, ignoring any backoff.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let mut last_failure = self.refresh_lock.lock().await;
        self.refresh_locked(&mut last_failure).await.map(|_| ())
    }

    /// Find the key for a token's `kid` and build a decoding key for `algorithm`.
    ///
    /// Without a `kid`, the first key compatible with `algorithm` is used.
    /// The JWK must be able to serve `algorithm`: an RSA key is never used for
    /// an EC algorithm and a key that declares its own `alg` must declare the
    /// expected one.
    pub async fn decoding_key(
        &self,
        kid: Option<&str>,
        algorithm: Algorithm,
    ) -> Result<DecodingKey, AuthError> {
        let jwks = self.get().await?;

        let jwk = match kid {
            Some(kid) => {
                let jwk = jwks
                    .keys
                    .iter()
                    .find(|k| k.common.key_id.as_deref() == Some(kid))
                    .ok_or(AuthError::NoMatchingKey)?;
                if !jwk_supports(jwk, algorithm) {
                    return Err(AuthError::AlgorithmMismatch);
                }
                jwk
            }
            None => jwks
                .keys
                .iter()
                .find(|k| jwk_supports(k, algorithm))
                .ok_or(AuthError::NoMatchingKey)?,
        };

        jwk_to_decoding_key(jwk)
    }

    async fn cached(&self) -> Option<Arc<JwkSet>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| Arc::clone(&entry.jwks))
    }

    /// Fetch and store; caller holds `refresh_lock`.
    async fn refresh_locked(
        &self,
        last_failure: &mut Option<Failure>,
    ) -> Result<Arc<JwkSet>, AuthError> {
        let jwks = match self.fetch_jwks().await {
            Ok(jwks) => Arc::new(jwks),
            Err(error) => {
                *last_failure = Some(Failure {
                    at: Instant::now(),
                    error: error.clone(),
                });
                return Err(error);
            }
        };
        *last_failure = None;
        tracing::info!(
            url = %self.jwks_url,
            keys = jwks.keys.len(),
            "Fetched JWKS"
        );

        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            jwks: Arc::clone(&jwks),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }

    /// Fetch JWKS from the endpoint.
    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.jwks_url, error = %e, "JWKS request failed");
                AuthError::JwksUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!(url = %self.jwks_url, status = %response.status(), "JWKS endpoint returned an error");
            return Err(AuthError::JwksUnavailable(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::JwksUnavailable(format!("invalid JWKS document: {e}")))
    }
}

/// Whether `jwk` may verify signatures made with `algorithm`.
fn jwk_supports(jwk: &Jwk, algorithm: Algorithm) -> bool {
    let family_ok = match &jwk.algorithm {
        AlgorithmParameters::RSA(_) => matches!(
            algorithm,
            Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512
        ),
        AlgorithmParameters::EllipticCurve(_) => {
            matches!(algorithm, Algorithm::ES256 | Algorithm::ES384)
        }
        AlgorithmParameters::OctetKeyPair(_) => algorithm == Algorithm::EdDSA,
        // Symmetric keys never verify user tokens.
        _ => false,
    };

    let declared_ok = jwk
        .common
        .key_algorithm
        .map_or(true, |declared| key_algorithm(declared) == Some(algorithm));

    family_ok && declared_ok
}

fn key_algorithm(declared: KeyAlgorithm) -> Option<Algorithm> {
    match declared {
        KeyAlgorithm::RS256 => Some(Algorithm::RS256),
        KeyAlgorithm::RS384 => Some(Algorithm::RS384),
        KeyAlgorithm::RS512 => Some(Algorithm::RS512),
        KeyAlgorithm::PS256 => Some(Algorithm::PS256),
        KeyAlgorithm::PS384 => Some(Algorithm::PS384),
        KeyAlgorithm::PS512 => Some(Algorithm::PS512),
        KeyAlgorithm::ES256 => Some(Algorithm::ES256),
        KeyAlgorithm::ES384 => Some(Algorithm::ES384),
        KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
        _ => None,
    }
}

/// Convert a JWK to a DecodingKey.
fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::InternalError(format!("Failed to create RSA key: {e}"))),
        AlgorithmParameters::EllipticCurve(ec) => DecodingKey::from_ec_components(&ec.x, &ec.y)
            .map_err(|e| AuthError::InternalError(format!("Failed to create EC key: {e}"))),
        AlgorithmParameters::OctetKeyPair(okp) => DecodingKey::from_ed_components(&okp.x)
            .map_err(|e| AuthError::InternalError(format!("Failed to create EdDSA key: {e}"))),
        _ => Err(AuthError::AlgorithmMismatch),
    }
}
