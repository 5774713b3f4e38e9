// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Supabase access-token authentication for the Petmatch API.
//!
//! ## Auth Flow
//!
//! 1. Frontend signs the user in with Supabase Auth
//! 2. Frontend sends `Authorization: Bearer <access token>`
//! 3. Server:
//!    - Fetches the project JWKS over HTTPS (cached for an hour)
//!    - Verifies signature and algorithm, expiry, issuer, audience
//!    - Requires a confirmed email
//!    - Extracts:
//!      - `sub` → canonical `user_id`
//!      - `app_metadata.user_type` → shelter / adopter
//! 4. Route handlers apply [`policy::authorize`] for shelter-only routes
//!
//! ## Security
//!
//! - All non-health endpoints require authentication
//! - Only the configured asymmetric algorithm is accepted
//! - A JWKS fetch failure fails the request; verification is never skipped
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod policy;
pub mod user_type;
pub mod validator;

pub use claims::{AuthenticatedUser, IdentityClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::JwksManager;
pub use policy::{authorize, Capability};
pub use user_type::UserType;
pub use validator::TokenValidator;
