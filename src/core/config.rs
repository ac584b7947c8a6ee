/*!
 * Runtime Configuration
 *
 * Assertion handling and registry sizing for the accessor runtime, plus the
 * telemetry settings used by `telemetry::init_with`
 */

use super::errors::{AccessorError, AccessorResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// How not-null and container invariant violations are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionMode {
    /// Return the violation as an error
    Enforce,
    /// Log the violation and carry on
    Warn,
    /// Skip the checks entirely
    Disabled,
}

impl Default for AssertionMode {
    /// Enforced in debug builds, skipped in optimized builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            AssertionMode::Enforce
        } else {
            AssertionMode::Disabled
        }
    }
}

impl FromStr for AssertionMode {
    type Err = AccessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" | "on" | "1" | "true" => Ok(AssertionMode::Enforce),
            "warn" => Ok(AssertionMode::Warn),
            "disabled" | "off" | "0" | "false" => Ok(AssertionMode::Disabled),
            other => Err(AccessorError::Configuration(
                format!("unknown assertion mode '{}'", other).into(),
            )),
        }
    }
}

/// Accessor runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Handling of not-null and container invariant violations
    pub assertions: AssertionMode,
    /// Initial capacity of the named lock registry
    pub lock_registry_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            assertions: AssertionMode::default(),
            lock_registry_capacity: 64,
        }
    }
}

impl RuntimeConfig {
    /// Every violation is an error, regardless of build profile
    pub fn strict() -> Self {
        Self {
            assertions: AssertionMode::Enforce,
            ..Default::default()
        }
    }

    /// Violations are logged, never returned
    pub fn permissive() -> Self {
        Self {
            assertions: AssertionMode::Warn,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> AccessorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by environment variables
    ///
    /// - ACCESSOR_ASSERTIONS: enforce | warn | disabled
    /// - ACCESSOR_LOCK_CAPACITY: initial lock registry capacity
    pub fn from_env() -> AccessorResult<Self> {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("ACCESSOR_ASSERTIONS") {
            config.assertions = mode.parse()?;
        }

        if let Ok(capacity) = std::env::var("ACCESSOR_LOCK_CAPACITY") {
            config.lock_registry_capacity = capacity.trim().parse().map_err(|_| {
                AccessorError::Configuration(
                    format!("invalid ACCESSOR_LOCK_CAPACITY '{}'", capacity).into(),
                )
            })?;
        }

        Ok(config)
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// EnvFilter directive, e.g. "info" or "accessor_runtime=trace"
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Append log lines to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            log_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Environment variables:
    /// - RUST_LOG: filter directive (default: info)
    /// - ACCESSOR_TRACE_JSON: enable JSON output (default: false)
    /// - ACCESSOR_LOG_FILE: append to this file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            config.filter = filter;
        }

        config.json = std::env::var("ACCESSOR_TRACE_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        config.log_file = std::env::var_os("ACCESSOR_LOG_FILE").map(PathBuf::from);

        config
    }
}
