// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds an idle recording session may live before its draft
    /// activity is discarded
    pub recording_timeout_secs: u64,
    /// Maximum accepted GPX upload size in bytes
    pub gpx_max_bytes: u64,
}

impl Default for Config {
    /// Default config, also used in tests.
    fn default() -> Self {
        Self {
            recording_timeout_secs: 20 * 60,
            gpx_max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            recording_timeout_secs: read_u64(
                "RECORDING_TIMEOUT_SECS",
                defaults.recording_timeout_secs,
            )?,
            gpx_max_bytes: read_u64("GPX_MAX_BYTES", defaults.gpx_max_bytes)?,
        })
    }
}

fn read_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
