//! Per-user, per-action fixed-window rate limiting.
//!
//! Each `(action, user)` key moves through:
//!
//! ```text
//! absent ──check──► active(1, reset_at)
//! active(n < limit) ──check──► active(n + 1, reset_at)
//! active(n >= limit) ──check──► denied, unchanged
//! active(_) ──reset_at passes──► absent
//! ```
//!
//! Every transition is a compare-and-swap against the counter store, so two
//! concurrent checks on one key can never both take the last slot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::GuardConfig;
use crate::store::{CounterStore, MemoryStore};
use crate::types::{
    counter_key, AbuseAlert, RateLimitDecision, RateLimitRecord, Result, RATE_LIMIT_EXCEEDED,
};
use crate::violation::ViolationTracker;

/// Rate limit guard with abuse escalation.
pub struct RateLimitGuard {
    config: GuardConfig,
    counters: Arc<dyn CounterStore<RateLimitRecord>>,
    violations: ViolationTracker,
}

impl RateLimitGuard {
    /// Create a guard over an injected counter store and violation tracker.
    pub fn new(
        config: GuardConfig,
        counters: Arc<dyn CounterStore<RateLimitRecord>>,
        violations: ViolationTracker,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            counters,
            violations,
        })
    }

    /// Guard with process-local stores. State does not survive a restart.
    pub fn in_memory(config: GuardConfig) -> Result<Self> {
        let violations = ViolationTracker::in_memory(&config);
        Self::new(
            config,
            Arc::new(MemoryStore::<RateLimitRecord>::new()),
            violations,
        )
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check and consume one request for `user_id` now.
    pub fn check(&self, user_id: &str, action: &str) -> RateLimitDecision {
        self.check_at(user_id, action, Utc::now())
    }

    /// Check and consume one request for `user_id` at `now`.
    ///
    /// Anonymous callers (empty `user_id`) are never limited. Unconfigured
    /// actions, store failures, and exhausted retries all deny.
    pub fn check_at(&self, user_id: &str, action: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let limit = self.config.quota(action);
        if user_id.is_empty() {
            let limit = limit.unwrap_or(0);
            return RateLimitDecision::allow(limit, limit, now);
        }
        let Some(limit) = limit else {
            warn!(user_id, action, "Rate limit check for unconfigured action denied");
            return RateLimitDecision::deny(0, now);
        };

        let key = counter_key(action, user_id);
        for attempt in 1..=self.config.max_cas_attempts {
            let current = match self.counters.get(&key, now) {
                Ok(current) => current,
                Err(e) => {
                    warn!(user_id, action, error = %e, "Counter read failed, denying");
                    return RateLimitDecision::deny(limit, now);
                }
            };

            let (next, decision) = match current {
                None => {
                    let reset_at = now + self.config.window();
                    (
                        RateLimitRecord {
                            count: 1,
                            window_reset_at: reset_at,
                        },
                        RateLimitDecision::allow(limit, limit - 1, reset_at),
                    )
                }
                Some(record) if record.count >= limit => {
                    debug!(user_id, action, limit, "Rate limit exceeded");
                    self.record_exceeded(user_id, now);
                    return RateLimitDecision::deny(limit, record.window_reset_at);
                }
                Some(record) => (
                    RateLimitRecord {
                        count: record.count + 1,
                        ..record
                    },
                    RateLimitDecision::allow(limit, limit - record.count - 1, record.window_reset_at),
                ),
            };

            match self
                .counters
                .compare_and_swap(&key, current.as_ref(), next, next.window_reset_at, now)
            {
                Ok(true) => return decision,
                Ok(false) => {
                    debug!(user_id, action, attempt, "Counter changed underneath, retrying");
                }
                Err(e) => {
                    warn!(user_id, action, error = %e, "Counter write failed, denying");
                    return RateLimitDecision::deny(limit, now);
                }
            }
        }

        warn!(
            user_id,
            action,
            attempts = self.config.max_cas_attempts,
            "Rate limit counter contended, denying"
        );
        RateLimitDecision::deny(limit, now)
    }

    fn record_exceeded(&self, user_id: &str, now: DateTime<Utc>) {
        if let Err(e) = self
            .violations
            .log_violation_at(user_id, RATE_LIMIT_EXCEEDED, now)
        {
            warn!(user_id, error = %e, "Failed to record rate limit violation");
        }
    }

    /// What `check` would return now, without consuming a request.
    pub fn peek(&self, user_id: &str, action: &str) -> RateLimitDecision {
        self.peek_at(user_id, action, Utc::now())
    }

    pub fn peek_at(&self, user_id: &str, action: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let limit = self.config.quota(action);
        if user_id.is_empty() {
            let limit = limit.unwrap_or(0);
            return RateLimitDecision::allow(limit, limit, now);
        }
        let Some(limit) = limit else {
            return RateLimitDecision::deny(0, now);
        };

        match self.counters.get(&counter_key(action, user_id), now) {
            Ok(None) => RateLimitDecision::allow(limit, limit, now + self.config.window()),
            Ok(Some(record)) if record.count >= limit => {
                RateLimitDecision::deny(limit, record.window_reset_at)
            }
            Ok(Some(record)) => {
                RateLimitDecision::allow(limit, limit - record.count, record.window_reset_at)
            }
            Err(e) => {
                warn!(user_id, action, error = %e, "Counter read failed, denying");
                RateLimitDecision::deny(limit, now)
            }
        }
    }

    /// Forget the counter for one `(user, action)` pair.
    pub fn reset(&self, user_id: &str, action: &str) -> Result<()> {
        self.counters.remove(&counter_key(action, user_id))
    }

    /// Record an abuse violation for `user_id`.
    pub fn log_violation(&self, user_id: &str, violation_type: &str) -> Result<Option<AbuseAlert>> {
        self.violations.log_violation(user_id, violation_type)
    }

    pub fn is_flagged(&self, user_id: &str) -> bool {
        self.violations.is_flagged(user_id)
    }

    pub fn violations(&self) -> &ViolationTracker {
        &self.violations
    }

    /// Drop expired rate limit and violation windows.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let counters = self.counters.purge_expired(now)?;
        let violations = self.violations.purge_expired(now)?;
        debug!(counters, violations, "Purged expired guard state");
        Ok(counters + violations)
    }
}

impl std::fmt::Debug for RateLimitGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitGuard")
            .field("config", &self.config)
            .field("violations", &self.violations)
            .finish_non_exhaustive()
    }
}
