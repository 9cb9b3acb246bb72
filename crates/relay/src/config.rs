// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relay configuration.
//!
//! Values come from defaults, then an optional TOML file, then `BW_*`
//! environment variables (see [`crate::env`]).
//!
//! ```toml
//! protocol_version = 3
//! queue_depth = 1024
//! locale = "de-DE"
//!
//! [limits]
//! max_string_len = 16777216
//! max_collection_len = 1048576
//! ```

use std::path::Path;

use bw_wire::{WireLimits, MIN_PROTOCOL_VERSION, PROTOCOL_VERSION};
use serde::Deserialize;

use crate::env;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Highest protocol version offered in the handshake
    pub protocol_version: i32,
    /// Decoded events buffered between node readers and the sink
    pub queue_depth: usize,
    pub limits: WireLimits,
    /// Locale for messages created through a node link. `None` uses the
    /// process locale.
    pub locale: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            queue_depth: 1024,
            limits: WireLimits::default(),
            locale: None,
        }
    }
}

impl RelayConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(version) = env::protocol_version() {
            self.protocol_version = version;
        }
        if let Some(depth) = env::queue_depth() {
            self.queue_depth = depth;
        }
        if let Some(max) = env::max_string_len() {
            self.limits.max_string_len = max;
        }
        if let Some(max) = env::max_collection_len() {
            self.limits.max_collection_len = max;
        }
        if let Some(locale) = env::locale() {
            self.locale = Some(locale);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PROTOCOL_VERSION..=PROTOCOL_VERSION).contains(&self.protocol_version) {
            return Err(ConfigError::UnsupportedVersion(self.protocol_version));
        }
        if self.queue_depth == 0 {
            return Err(ConfigError::ZeroQueueDepth);
        }
        Ok(())
    }

    /// Locale name for new messages: configured, else the process locale.
    pub fn locale_name(&self) -> String {
        match &self.locale {
            Some(name) => bw_core::locale::normalize_name(name),
            None => bw_core::Locale::current_name(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
