// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints that cannot be expressed via serde attributes,
//! collecting every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::InkstoneConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &InkstoneConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "service.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}; got `{}`",
                LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    // A zero lifetime would flush the cache on every access.
    if config.cache.max_age_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "cache.max_age_secs must be at least 1".to_string(),
        });
    }

    if config.publish.actor.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "publish.actor must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
