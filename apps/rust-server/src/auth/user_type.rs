// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account types carried in `app_metadata.user_type`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account type of an authenticated user.
///
/// The set is open: the auth provider may assign values this service does
/// not act on, which are preserved as [`UserType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Shelter staff; may publish pet listings and read analytics
    Shelter,
    /// Prospective adopter
    Adopter,
    /// Any other value assigned by the auth provider
    Other(String),
}

impl UserType {
    /// Parse from the claim value. Known types match exactly; `"Shelter"`
    /// or `" shelter "` is some other type.
    pub fn from_claim(value: &str) -> UserType {
        match value {
            "shelter" => UserType::Shelter,
            "adopter" => UserType::Adopter,
            _ => UserType::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserType::Shelter => "shelter",
            UserType::Adopter => "adopter",
            UserType::Other(value) => value,
        }
    }

    pub fn is_shelter(&self) -> bool {
        *self == UserType::Shelter
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UserType::from_claim(&raw))
    }
}
