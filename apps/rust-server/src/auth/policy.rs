// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-route access rules applied to an already verified identity.

use super::{AuthError, AuthenticatedUser};

/// What a route requires of the caller beyond a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any verified identity
    Authenticated,
    /// `app_metadata.user_type == "shelter"`
    ShelterOnly,
}

impl Capability {
    pub fn allows(self, user: &AuthenticatedUser) -> bool {
        match self {
            Capability::Authenticated => true,
            Capability::ShelterOnly => user.is_shelter(),
        }
    }
}

/// Allow the request or deny it with `denial` as the client-facing message.
///
/// The message is fixed per route and never depends on whether the target
/// resource exists.
pub fn authorize(
    user: &AuthenticatedUser,
    capability: Capability,
    denial: &str,
) -> Result<(), AuthError> {
    if capability.allows(user) {
        return Ok(());
    }
    tracing::debug!(
        user_id = %user.user_id,
        capability = ?capability,
        "Access policy denied request"
    );
    Err(AuthError::Forbidden(denial.to_string()))
}
