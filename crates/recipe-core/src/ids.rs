// ABOUTME: Opaque global identifiers encoding an entity kind and a storage key
// ABOUTME: base64("Kind:key") on the wire, with kind checks on decode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kinds of entity that can be addressed by a [`GlobalId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// An ingredient record
    Ingredient,
    /// A recipe record
    Recipe,
}

impl EntityKind {
    /// Name written into the encoded id
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingredient => "Ingredient",
            Self::Recipe => "Recipe",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "Ingredient" => Some(Self::Ingredient),
            "Recipe" => Some(Self::Recipe),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode an opaque id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Not base64, not UTF-8, missing the separator, or a non-numeric key
    #[error("Malformed id: {value}")]
    Malformed {
        /// The raw value supplied by the client
        value: String,
    },
    /// Well-formed but names a kind this API does not have
    #[error("Unknown entity kind in id: {kind}")]
    UnknownKind {
        /// The kind name found in the id
        kind: String,
    },
    /// Names a different kind than the argument expects
    #[error("Must receive a {expected} id, got a {found} id")]
    WrongKind {
        /// Kind required by the argument
        expected: EntityKind,
        /// Kind encoded in the id
        found: EntityKind,
    },
}

/// Externally visible identifier: a bijection with `(kind, storage key)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalId {
    kind: EntityKind,
    key: i64,
}

impl GlobalId {
    /// Build an id from its parts
    #[must_use]
    pub const fn new(kind: EntityKind, key: i64) -> Self {
        Self { kind, key }
    }

    /// Shorthand for an ingredient id
    #[must_use]
    pub const fn ingredient(key: i64) -> Self {
        Self::new(EntityKind::Ingredient, key)
    }

    /// Shorthand for a recipe id
    #[must_use]
    pub const fn recipe(key: i64) -> Self {
        Self::new(EntityKind::Recipe, key)
    }

    /// Encode to the opaque wire form
    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind, self.key))
    }

    /// Decode any well-formed id
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Malformed`] or [`IdError::UnknownKind`]
    pub fn decode(value: &str) -> Result<Self, IdError> {
        let malformed = || IdError::Malformed {
            value: value.to_owned(),
        };
        let bytes = STANDARD.decode(value.trim()).map_err(|_| malformed())?;
        let text = String::from_utf8(bytes).map_err(|_| malformed())?;
        let (kind, key) = text.split_once(':').ok_or_else(malformed)?;
        let key = key.parse::<i64>().map_err(|_| malformed())?;
        let kind = EntityKind::parse(kind).ok_or_else(|| IdError::UnknownKind {
            kind: kind.to_owned(),
        })?;
        Ok(Self { kind, key })
    }

    /// Decode an id that must name `expected`, returning its storage key
    ///
    /// # Errors
    ///
    /// Returns any [`GlobalId::decode`] error, or [`IdError::WrongKind`]
    pub fn decode_as(value: &str, expected: EntityKind) -> Result<i64, IdError> {
        let id = Self::decode(value)?;
        if id.kind != expected {
            return Err(IdError::WrongKind {
                expected,
                found: id.kind,
            });
        }
        Ok(id.key)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for GlobalId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for GlobalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for GlobalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::decode(&raw).map_err(serde::de::Error::custom)
    }
}
