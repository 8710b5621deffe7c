// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Inkstone notification backend.

use thiserror::Error;

/// The primary error type used across all Inkstone collaborator traits and
/// core operations.
#[derive(Debug, Error)]
pub enum InkstoneError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Store backend errors (lookup failure, write failure, serialization).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel sender errors (transport failure, rejected payload, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The referenced member does not exist in the member store.
    #[error("member not found: {id}")]
    MemberNotFound { id: String },

    /// A member profile carries a time zone name the IANA database does not know.
    #[error("unrecognized time zone `{zone}` for member {member_id}")]
    Timezone { member_id: String, zone: String },

    /// The caller violated an API contract (e.g. an empty member id).
    #[error("contract violation: {0}")]
    Contract(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
