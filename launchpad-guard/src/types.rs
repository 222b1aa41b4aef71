//! Records, decisions, and errors shared by the guard components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action names with a default hourly quota.
pub mod actions {
    pub const CONNECTION_REQUEST: &str = "connection_request";
    pub const MESSAGE_SEND: &str = "message_send";
    pub const ENDORSEMENT: &str = "endorsement";
    pub const STARTUP_INTEREST: &str = "startup_interest";
    pub const REPORT: &str = "report";
    pub const PITCH_REPORT: &str = "pitch_report";
}

/// Violation type recorded whenever a quota denies a request.
pub const RATE_LIMIT_EXCEEDED: &str = "rate_limit_exceeded";

/// Counter state for one `(user, action)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    /// Requests admitted in the current window
    pub count: u32,
    /// When the window closes
    pub window_reset_at: DateTime<Utc>,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the window after this one
    pub remaining: u32,
    /// When the window closes
    pub reset_at: DateTime<Utc>,
    /// Quota for the action (0 when the action is not configured)
    pub limit: u32,
}

impl RateLimitDecision {
    pub(crate) fn allow(limit: u32, remaining: u32, reset_at: DateTime<Utc>) -> Self {
        Self {
            allowed: true,
            remaining,
            reset_at,
            limit,
        }
    }

    pub(crate) fn deny(limit: u32, reset_at: DateTime<Utc>) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            reset_at,
            limit,
        }
    }
}

/// Counter state for one `(user, violation type)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Violations seen in the current window
    pub count: u32,
    /// When the window closes
    pub window_reset_at: DateTime<Utc>,
}

/// Raised when a user reaches the violation threshold inside one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuseAlert {
    /// Offending user
    pub user_id: String,
    /// Violation kind that crossed the threshold
    pub violation_type: String,
    /// Violations counted when the alert fired
    pub count: u32,
    /// When the threshold was reached
    pub raised_at: DateTime<Utc>,
}

/// Error types for the guard.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Backing store failed
    #[error("Store error: {0}")]
    Store(String),

    /// Another writer kept winning the compare-and-swap
    #[error("Contention on {key} after {attempts} attempts")]
    Contention { key: String, attempts: u32 },

    /// Violation types name a counter namespace and may not contain ':'
    #[error("Invalid violation type: {0:?}")]
    InvalidViolationType(String),

    /// Configuration could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration parsed but is not usable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A coalesced fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;

/// Store key for a per-user counter. Namespace names never contain ':'.
pub(crate) fn counter_key(namespace: &str, user_id: &str) -> String {
    format!("{namespace}:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_key_puts_namespace_first() {
        assert_eq!(counter_key("endorsement", "user:1"), "endorsement:user:1");
    }

    #[test]
    fn test_error_display() {
        let err = GuardError::Contention {
            key: "report:u1".to_string(),
            attempts: 8,
        };
        assert_eq!(err.to_string(), "Contention on report:u1 after 8 attempts");
    }
}
