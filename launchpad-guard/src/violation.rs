//! Abuse escalation.
//!
//! Violations are counted per `(user, violation type)` inside a short window.
//! Reaching the threshold raises one [`AbuseAlert`], resets the counter, and
//! flags the user. The next alert for the same pair needs a full threshold of
//! fresh violations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::config::{GuardConfig, ViolationConfig};
use crate::store::{CounterStore, MemoryStore};
use crate::types::{counter_key, AbuseAlert, GuardError, Result, ViolationRecord};

/// Receives abuse alerts.
pub trait AlertSink: Send + Sync {
    fn raise(&self, alert: &AbuseAlert);
}

/// Default sink: logs each alert at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn raise(&self, alert: &AbuseAlert) {
        warn!(
            user_id = %alert.user_id,
            violation_type = %alert.violation_type,
            count = alert.count,
            "Abuse threshold reached"
        );
    }
}

/// Counts violations and escalates repeat offenders.
pub struct ViolationTracker {
    config: ViolationConfig,
    max_cas_attempts: u32,
    store: Arc<dyn CounterStore<ViolationRecord>>,
    sink: Arc<dyn AlertSink>,
    /// Flagged users and when they were first flagged
    flagged: DashMap<String, DateTime<Utc>>,
}

impl ViolationTracker {
    /// Create a tracker over an injected store and alert sink.
    pub fn new(
        config: &GuardConfig,
        store: Arc<dyn CounterStore<ViolationRecord>>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            config: config.violations.clone(),
            max_cas_attempts: config.max_cas_attempts,
            store,
            sink,
            flagged: DashMap::new(),
        }
    }

    /// In-memory tracker that logs alerts.
    pub fn in_memory(config: &GuardConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryStore::<ViolationRecord>::new()),
            Arc::new(TracingAlertSink),
        )
    }

    /// Record a violation now.
    pub fn log_violation(&self, user_id: &str, violation_type: &str) -> Result<Option<AbuseAlert>> {
        self.log_violation_at(user_id, violation_type, Utc::now())
    }

    /// Record a violation at `now`, returning the alert if this one reached
    /// the threshold.
    pub fn log_violation_at(
        &self,
        user_id: &str,
        violation_type: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AbuseAlert>> {
        if violation_type.is_empty() || violation_type.contains(':') {
            return Err(GuardError::InvalidViolationType(violation_type.to_string()));
        }
        let key = counter_key(violation_type, user_id);

        for _ in 0..self.max_cas_attempts {
            let current = self.store.get(&key, now)?;
            let count = current.map_or(1, |r| r.count + 1);
            let window_reset_at = current.map_or(now + self.config.window(), |r| r.window_reset_at);

            if count >= self.config.threshold {
                // Reset by writing a record that is already expired.
                let reset = ViolationRecord {
                    count: 0,
                    window_reset_at: now,
                };
                if !self
                    .store
                    .compare_and_swap(&key, current.as_ref(), reset, now, now)?
                {
                    continue;
                }
                return Ok(Some(self.escalate(user_id, violation_type, count, now)));
            }

            let next = ViolationRecord {
                count,
                window_reset_at,
            };
            if self
                .store
                .compare_and_swap(&key, current.as_ref(), next, window_reset_at, now)?
            {
                debug!(user_id, violation_type, count, "Violation recorded");
                return Ok(None);
            }
        }

        Err(GuardError::Contention {
            key,
            attempts: self.max_cas_attempts,
        })
    }

    fn escalate(&self, user_id: &str, violation_type: &str, count: u32, now: DateTime<Utc>) -> AbuseAlert {
        let alert = AbuseAlert {
            user_id: user_id.to_string(),
            violation_type: violation_type.to_string(),
            count,
            raised_at: now,
        };
        self.flagged.entry(user_id.to_string()).or_insert(now);
        info!(user_id, violation_type, count, "User flagged for review");
        self.sink.raise(&alert);
        alert
    }

    /// Whether any alert has fired for this user since the last clear.
    pub fn is_flagged(&self, user_id: &str) -> bool {
        self.flagged.contains_key(user_id)
    }

    /// When the user was flagged, if they are.
    pub fn flagged_at(&self, user_id: &str) -> Option<DateTime<Utc>> {
        self.flagged.get(user_id).map(|at| *at)
    }

    /// Lift a flag after review. Returns whether the user was flagged.
    pub fn clear_flag(&self, user_id: &str) -> bool {
        self.flagged.remove(user_id).is_some()
    }

    /// Drop expired violation windows.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        self.store.purge_expired(now)
    }
}

impl std::fmt::Debug for ViolationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViolationTracker")
            .field("config", &self.config)
            .field("flagged", &self.flagged.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<AbuseAlert>>);

    impl AlertSink for RecordingSink {
        fn raise(&self, alert: &AbuseAlert) {
            self.0.lock().unwrap().push(alert.clone());
        }
    }

    fn tracker() -> (ViolationTracker, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let tracker = ViolationTracker::new(
            &GuardConfig::default(),
            Arc::new(MemoryStore::<ViolationRecord>::new()),
            sink.clone(),
        );
        (tracker, sink)
    }

    #[test]
    fn test_alert_on_fifth_violation() {
        let (tracker, sink) = tracker();
        let now = Utc::now();

        for _ in 0..4 {
            assert!(tracker.log_violation_at("u1", "spam", now).unwrap().is_none());
        }
        assert!(!tracker.is_flagged("u1"));

        let alert = tracker.log_violation_at("u1", "spam", now).unwrap().unwrap();
        assert_eq!(alert.count, 5);
        assert_eq!(alert.violation_type, "spam");
        assert!(tracker.is_flagged("u1"));
        assert_eq!(tracker.flagged_at("u1"), Some(now));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_counter_resets_after_alert() {
        let (tracker, sink) = tracker();
        let now = Utc::now();

        let alerts = (0..10)
            .filter_map(|_| tracker.log_violation_at("u1", "spam", now).unwrap())
            .count();
        // Violations 6-9 start a fresh count; the 10th alerts again.
        assert_eq!(alerts, 2);
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_window_expiry_starts_fresh() {
        let (tracker, _) = tracker();
        let now = Utc::now();

        for _ in 0..4 {
            tracker.log_violation_at("u1", "spam", now).unwrap();
        }
        let later = now + Duration::seconds(300);
        assert!(tracker.log_violation_at("u1", "spam", later).unwrap().is_none());
        assert!(!tracker.is_flagged("u1"));
    }

    #[test]
    fn test_types_counted_separately() {
        let (tracker, _) = tracker();
        let now = Utc::now();

        for _ in 0..4 {
            tracker.log_violation_at("u1", "spam", now).unwrap();
            tracker.log_violation_at("u1", "harassment", now).unwrap();
            tracker.log_violation_at("u2", "spam", now).unwrap();
        }
        assert!(!tracker.is_flagged("u1"));
        assert!(!tracker.is_flagged("u2"));
    }

    #[test]
    fn test_rejects_ambiguous_violation_type() {
        let (tracker, _) = tracker();
        assert!(matches!(
            tracker.log_violation("u1", "spam:bulk"),
            Err(GuardError::InvalidViolationType(_))
        ));
    }

    #[test]
    fn test_clear_flag() {
        let (tracker, _) = tracker();
        let now = Utc::now();
        for _ in 0..5 {
            tracker.log_violation_at("u1", "spam", now).unwrap();
        }
        assert!(tracker.clear_flag("u1"));
        assert!(!tracker.is_flagged("u1"));
        assert!(!tracker.clear_flag("u1"));
    }

    #[test]
    fn test_purge_expired() {
        let (tracker, _) = tracker();
        let now = Utc::now();
        tracker.log_violation_at("u1", "spam", now).unwrap();
        assert_eq!(tracker.purge_expired(now).unwrap(), 0);
        assert_eq!(tracker.purge_expired(now + Duration::minutes(5)).unwrap(), 1);
    }
}
