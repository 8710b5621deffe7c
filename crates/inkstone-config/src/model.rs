// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for the Inkstone prompt service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Inkstone configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional and defaults to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InkstoneConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Read-through cache tuning.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Editorial publish run settings.
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name this process reports in logs.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "inkstone".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Read-through cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Seconds a cache generation lives before every entry is dropped at once.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl CacheConfig {
    /// The configured lifetime as a `Duration`, ready to hand to the cache
    /// constructor.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
        }
    }
}

fn default_max_age_secs() -> u64 {
    900
}

/// Editorial publish run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Actor id recorded on automated status updates.
    #[serde(default = "default_publish_actor")]
    pub actor: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            actor: default_publish_actor(),
        }
    }
}

fn default_publish_actor() -> String {
    "inkstone-publisher".to_string()
}
