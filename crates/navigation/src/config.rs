//! Guard/gate configuration.

use pymes_auth::Requirement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gate::Gate;

pub const AUTH_PATH_VAR: &str = "PYMES_AUTH_PATH";
pub const FALLBACK_PATH_VAR: &str = "PYMES_FALLBACK_PATH";
pub const MISSING_REQUIREMENT_VAR: &str = "PYMES_MISSING_REQUIREMENT";

/// What a render gate does when the caller declared no requirement at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRequirementPolicy {
    /// Hide the fragment. Use `Requirement::Public` to show it to everyone.
    #[default]
    FailClosed,
    /// Show the fragment anyway.
    FailOpen,
}

impl core::str::FromStr for MissingRequirementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail_closed" | "closed" => Ok(Self::FailClosed),
            "fail_open" | "open" => Ok(Self::FailOpen),
            other => Err(ConfigError::InvalidPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown missing-requirement policy '{0}' (expected fail_open or fail_closed)")]
    InvalidPolicy(String),

    #[error("path '{0}' must start with '/'")]
    InvalidPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Authentication entry point for unauthenticated visitors.
    pub auth_path: String,
    /// Where denied navigations land unless the route names its own fallback.
    pub default_fallback: String,
    pub missing_requirement: MissingRequirementPolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            auth_path: "/auth".to_string(),
            default_fallback: "/dashboard".to_string(),
            missing_requirement: MissingRequirementPolicy::FailClosed,
        }
    }
}

impl GateConfig {
    /// Read overrides from the process environment.
    ///
    /// Invalid values are logged and the default kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Render gate for `requirement` under the configured missing-requirement policy.
    pub fn gate(&self, requirement: impl Into<Requirement>) -> Gate {
        Gate::new(requirement).policy(self.missing_requirement)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(AUTH_PATH_VAR) {
            match validate_path(path) {
                Ok(path) => config.auth_path = path,
                Err(e) => tracing::warn!(error = %e, "{AUTH_PATH_VAR} ignored"),
            }
        }

        if let Some(path) = lookup(FALLBACK_PATH_VAR) {
            match validate_path(path) {
                Ok(path) => config.default_fallback = path,
                Err(e) => tracing::warn!(error = %e, "{FALLBACK_PATH_VAR} ignored"),
            }
        }

        if let Some(raw) = lookup(MISSING_REQUIREMENT_VAR) {
            match raw.parse() {
                Ok(policy) => config.missing_requirement = policy,
                Err(e) => tracing::warn!(error = %e, "{MISSING_REQUIREMENT_VAR} ignored"),
            }
        }

        if config.missing_requirement == MissingRequirementPolicy::FailOpen {
            tracing::warn!("gates without a declared requirement will render their content");
        }

        config
    }
}

fn validate_path(path: String) -> Result<String, ConfigError> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(ConfigError::InvalidPath(path))
    }
}
