// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration
//!
//! Loaded from TOML. Durations use humantime syntax:
//!
//! ```toml
//! push_deadline = "25s"
//! background_budget = "30s"
//! budget_safety_margin = "2s"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("push_deadline {deadline:?} must be shorter than background_budget {budget:?} minus budget_safety_margin {margin:?}")]
    DeadlineExceedsBudget {
        deadline: Duration,
        budget: Duration,
        margin: Duration,
    },
    #[error("{0} must be non-zero")]
    ZeroDuration(&'static str),
}

/// Timing configuration shared by both coordinators
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// How long a push wake-up may run before it is force-ended
    #[serde(with = "humantime_serde")]
    pub push_deadline: Duration,
    /// Execution time the host grants a background activity
    #[serde(with = "humantime_serde")]
    pub background_budget: Duration,
    /// Slack kept between the push deadline and the host budget
    #[serde(with = "humantime_serde")]
    pub budget_safety_margin: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            push_deadline: Duration::from_secs(25),
            background_budget: Duration::from_secs(30),
            budget_safety_margin: Duration::from_secs(2),
        }
    }
}

impl CoordinatorConfig {
    pub fn with_push_deadline(mut self, deadline: Duration) -> Self {
        self.push_deadline = deadline;
        self
    }

    pub fn with_background_budget(mut self, budget: Duration) -> Self {
        self.background_budget = budget;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: CoordinatorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// The push deadline must fire before the host revokes the grant,
    /// otherwise the host would always win the race.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.push_deadline.is_zero() {
            return Err(ConfigError::ZeroDuration("push_deadline"));
        }
        if self.background_budget.is_zero() {
            return Err(ConfigError::ZeroDuration("background_budget"));
        }
        let usable = self
            .background_budget
            .saturating_sub(self.budget_safety_margin);
        if self.push_deadline >= usable {
            return Err(ConfigError::DeadlineExceedsBudget {
                deadline: self.push_deadline,
                budget: self.background_budget,
                margin: self.budget_safety_margin,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
