// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`AppConfig`] loaded once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SUPABASE_URL` | Supabase project URL (auth + PostgREST) | Required |
//! | `SUPABASE_SERVICE_ROLE_KEY` | Service-role key for PostgREST | Required |
//! | `OPENAI_API_KEY` | API key for embeddings and chat | Required |
//! | `OPENAI_BASE_URL` | OpenAI-compatible API base | `https://api.openai.com/v1` |
//! | `EMBEDDING_MODEL` | Embedding model name | `text-embedding-3-small` |
//! | `CHAT_MODEL` | Chat completion model name | `gpt-4o` |
//! | `JWKS_URL` | JWKS endpoint for JWT verification | `{SUPABASE_URL}/auth/v1/.well-known/jwks.json` |
//! | `AUTH_ISSUER` | Expected JWT issuer claim | `{SUPABASE_URL}/auth/v1` |
//! | `AUTH_AUDIENCE` | Expected JWT audience claim | Not checked |
//! | `AUTH_JWT_ALGORITHM` | Expected (asymmetric) signing algorithm | `RS256` |
//! | `JWKS_CACHE_TTL_SECS` | JWKS cache lifetime | `3600` |
//! | `UPSTREAM_TIMEOUT_SECS` | Timeout for every outbound call | `30` |
//! | `CORS_ALLOWED_ORIGIN` | The single browser origin allowed by CORS | `http://localhost:3000` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files; HTTPS when both are set | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::http::HeaderValue;
use jsonwebtoken::Algorithm;
use url::Url;

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const EMBEDDING_MODEL_ENV: &str = "EMBEDDING_MODEL";
pub const CHAT_MODEL_ENV: &str = "CHAT_MODEL";
pub const JWKS_URL_ENV: &str = "JWKS_URL";
pub const AUTH_ISSUER_ENV: &str = "AUTH_ISSUER";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const AUTH_JWT_ALGORITHM_ENV: &str = "AUTH_JWT_ALGORITHM";
pub const JWKS_CACHE_TTL_ENV: &str = "JWKS_CACHE_TTL_SECS";
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

/// Environment variable selecting the log output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// JWKS is refetched at most once per hour unless overridden.
pub const DEFAULT_JWKS_CACHE_TTL: Duration = Duration::from_secs(3600);

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwks_url: String,
    pub issuer: String,
    pub audience: Option<String>,
    pub algorithm: Algorithm,
    pub jwks_cache_ttl: Duration,
}

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: Url,
    pub supabase_service_key: String,
    pub openai_api_key: String,
    pub openai_base_url: Url,
    pub embedding_model: String,
    pub chat_model: String,
    pub auth: AuthSettings,
    pub upstream_timeout: Duration,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let supabase_url = parse_url(SUPABASE_URL_ENV, &require(SUPABASE_URL_ENV)?)?;
        let supabase_service_key = require(SUPABASE_SERVICE_ROLE_KEY_ENV)?;
        let openai_api_key = require(OPENAI_API_KEY_ENV)?;

        let openai_base_url = parse_url(
            OPENAI_BASE_URL_ENV,
            &get(OPENAI_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        )?;

        let project = supabase_url.as_str().trim_end_matches('/');
        let jwks_url = match get(JWKS_URL_ENV) {
            Some(url) => parse_url(JWKS_URL_ENV, &url)?.to_string(),
            None => format!("{project}/auth/v1/.well-known/jwks.json"),
        };
        let issuer = get(AUTH_ISSUER_ENV).unwrap_or_else(|| format!("{project}/auth/v1"));

        let algorithm = match get(AUTH_JWT_ALGORITHM_ENV) {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::RS256,
        };

        let jwks_cache_ttl = get(JWKS_CACHE_TTL_ENV)
            .map(|raw| parse_secs(JWKS_CACHE_TTL_ENV, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_JWKS_CACHE_TTL);
        let upstream_timeout = get(UPSTREAM_TIMEOUT_ENV)
            .map(|raw| parse_secs(UPSTREAM_TIMEOUT_ENV, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT);

        let origin = get(CORS_ALLOWED_ORIGIN_ENV).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(origin.trim_end_matches('/')).map_err(|e| {
            ConfigError::Invalid {
                name: CORS_ALLOWED_ORIGIN_ENV,
                reason: e.to_string(),
            }
        })?;

        let host = get(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = match get(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => 8080,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: format!("'{host}' is not an IP address"),
                })?;

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: TLS_CERT_PATH_ENV,
                    reason: "TLS_CERT_PATH and TLS_KEY_PATH must be set together".to_string(),
                })
            }
        };

        Ok(Self {
            supabase_url,
            supabase_service_key,
            openai_api_key,
            openai_base_url,
            embedding_model: get(EMBEDDING_MODEL_ENV)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: get(CHAT_MODEL_ENV).unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            auth: AuthSettings {
                jwks_url,
                issuer,
                audience: get(AUTH_AUDIENCE_ENV),
                algorithm,
                jwks_cache_ttl,
            },
            upstream_timeout,
            cors_origin,
            bind_addr,
            tls,
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_secs(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("'{raw}' is not a positive number of seconds"),
        }),
    }
}

/// Parse `AUTH_JWT_ALGORITHM`; HMAC algorithms are rejected.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: AUTH_JWT_ALGORITHM_ENV,
        reason,
    };
    let trimmed = raw.trim();
    let algorithm = trimmed
        .parse::<Algorithm>()
        .or_else(|_| trimmed.to_ascii_uppercase().parse::<Algorithm>())
        .map_err(|_| invalid(format!("unknown algorithm '{raw}'")))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            Err(invalid(format!("{algorithm:?} is symmetric")))
        }
        _ => Ok(algorithm),
    }
}
