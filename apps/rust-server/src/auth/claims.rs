// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{user_type::UserType, AuthError};

/// Claims carried by a Supabase access token.
///
/// Named fields are the ones authorization depends on; everything else the
/// provider puts in the token (`aud`, `role`, `session_id`, `user_metadata`,
/// ...) lands in `extra`.
///
/// A value of this type is only trustworthy once it came out of
/// [`TokenValidator`](super::TokenValidator), which checks the signature and
/// issuer before deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (Supabase user ID)
    pub sub: String,

    /// Issuer (`{SUPABASE_URL}/auth/v1`)
    pub iss: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// When the user confirmed their email address, as sent.
    ///
    /// Read through [`IdentityClaims::email_confirmed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<Value>,

    /// Supabase's name for `email_verified_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_confirmed_at: Option<Value>,

    /// Server-controlled metadata (not editable by the user)
    #[serde(default)]
    pub app_metadata: AppMetadata,

    /// Unrecognised extension claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaims {
    /// Email confirmation time from either claim name.
    ///
    /// RFC 3339 strings and Unix timestamps are accepted. Null, empty and
    /// unparseable values mean the email is unconfirmed.
    pub fn email_confirmed(&self) -> Option<DateTime<Utc>> {
        [&self.email_verified_at, &self.email_confirmed_at]
            .into_iter()
            .flatten()
            .find_map(parse_timestamp)
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}

/// `app_metadata` claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Authenticated user information extracted from a verified JWT.
///
/// This is the type handlers receive. Constructing one from claims enforces
/// the email-verification gate, so every instance has a confirmed email.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Canonical user ID (`sub` claim)
    pub user_id: String,

    /// Account type from `app_metadata.user_type`, if assigned
    pub user_type: Option<UserType>,

    pub email: Option<String>,

    pub email_verified_at: DateTime<Utc>,

    pub issuer: String,

    /// Token expiration (Unix timestamp)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Build from verified claims, rejecting identities without a confirmed email.
    pub fn from_claims(claims: IdentityClaims) -> Result<Self, AuthError> {
        let email_verified_at = claims
            .email_confirmed()
            .ok_or(AuthError::EmailNotVerified)?;

        Ok(Self {
            user_id: claims.sub,
            user_type: claims.app_metadata.user_type,
            email: claims.email,
            email_verified_at,
            issuer: claims.iss,
            expires_at: claims.exp,
        })
    }

    pub fn is_shelter(&self) -> bool {
        self.user_type.as_ref().is_some_and(UserType::is_shelter)
    }
}
