// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./inkstone.toml` > `~/.config/inkstone/inkstone.toml`
//! > `/etc/inkstone/inkstone.toml`, with environment variable overrides via
//! the `INKSTONE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::InkstoneConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/inkstone/inkstone.toml` (system-wide)
/// 3. `~/.config/inkstone/inkstone.toml` (user XDG config)
/// 4. `./inkstone.toml` (local directory)
/// 5. `INKSTONE_*` environment variables
pub fn load_config() -> Result<InkstoneConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InkstoneConfig::default()))
        .merge(Toml::file("/etc/inkstone/inkstone.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("inkstone/inkstone.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("inkstone.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file or env lookup).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<InkstoneConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InkstoneConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<InkstoneConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InkstoneConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: splitting on underscores
/// is ambiguous for keys that contain them. `INKSTONE_CACHE_MAX_AGE_SECS`
/// must map to `cache.max_age_secs`, not `cache.max.age.secs`.
fn env_provider() -> Env {
    Env::prefixed("INKSTONE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. INKSTONE_CACHE_MAX_AGE_SECS -> "cache_max_age_secs".
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("publish_", "publish.", 1);
        mapped.into()
    })
}
