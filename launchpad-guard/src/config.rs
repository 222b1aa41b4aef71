//! Configuration for rate limits and violation tracking.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::{actions, GuardError, Result};

/// Longest window accepted for either counter.
const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuration for the guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Rate limit window length in seconds
    pub window_secs: u64,
    /// Requests allowed per window, by action
    pub quotas: BTreeMap<String, u32>,
    /// Abuse escalation settings
    pub violations: ViolationConfig,
    /// Compare-and-swap retries before a check fails closed
    pub max_cas_attempts: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        let quotas = [
            (actions::CONNECTION_REQUEST, 20),
            (actions::MESSAGE_SEND, 100),
            (actions::ENDORSEMENT, 10),
            (actions::STARTUP_INTEREST, 30),
            (actions::REPORT, 5),
            (actions::PITCH_REPORT, 10),
        ]
        .into_iter()
        .map(|(action, limit)| (action.to_string(), limit))
        .collect();

        Self {
            window_secs: 3600,
            quotas,
            violations: ViolationConfig::default(),
            max_cas_attempts: 8,
        }
    }
}

impl GuardConfig {
    /// Load config from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Quota for an action, `None` if the action is not configured.
    pub fn quota(&self, action: &str) -> Option<u32> {
        self.quotas.get(action).copied()
    }

    /// Rate limit window length
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs as i64)
    }

    pub fn validate(&self) -> Result<()> {
        check_window("window_secs", self.window_secs)?;
        check_window("violations.window_secs", self.violations.window_secs)?;

        for (action, limit) in &self.quotas {
            if action.is_empty() || action.contains(':') {
                return Err(GuardError::Config(format!(
                    "invalid action name {action:?}"
                )));
            }
            if *limit == 0 {
                return Err(GuardError::Config(format!(
                    "quotas.{action} must be at least 1"
                )));
            }
        }
        if self.violations.threshold == 0 {
            return Err(GuardError::Config(
                "violations.threshold must be at least 1".to_string(),
            ));
        }
        if self.max_cas_attempts == 0 {
            return Err(GuardError::Config(
                "max_cas_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_window(field: &str, secs: u64) -> Result<()> {
    if secs == 0 || secs > MAX_WINDOW_SECS {
        return Err(GuardError::Config(format!(
            "{field} must be between 1 and {MAX_WINDOW_SECS}, got {secs}"
        )));
    }
    Ok(())
}

/// Abuse escalation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolationConfig {
    /// Violation window length in seconds
    pub window_secs: u64,
    /// Violations inside one window that raise an alert
    pub threshold: u32,
}

impl Default for ViolationConfig {
    fn default() -> Self {
        Self {
            window_secs: 300,
            threshold: 5,
        }
    }
}

impl ViolationConfig {
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs as i64)
    }
}
