//! Launchpad Guard
//!
//! Stateful protections that sit in front of the decision engine:
//!
//! - **Rate limits**: fixed hourly quotas per user and action, failing closed
//!   for anything unconfigured
//! - **Abuse escalation**: violation counting with a single alert per burst
//! - **Coalesced fetching**: single-flight, minimum-interval, and debounced
//!   refresh of any async data source
//!
//! Counters live behind the [`CounterStore`] trait. The bundled
//! [`MemoryStore`] keeps them in process memory, so they reset on restart.
//!
//! # Example
//!
//! ```
//! use launchpad_guard::{actions, GuardConfig, RateLimitGuard};
//!
//! let guard = RateLimitGuard::in_memory(GuardConfig::default()).unwrap();
//! let decision = guard.check("user-1", actions::CONNECTION_REQUEST);
//! assert!(decision.allowed);
//! assert_eq!(decision.remaining, 19);
//! ```

pub mod coalesce;
pub mod config;
pub mod limiter;
pub mod store;
pub mod types;
pub mod violation;

// Re-export main types
pub use coalesce::{CoalesceConfig, CoalescingFetcher};
pub use config::{GuardConfig, ViolationConfig};
pub use limiter::RateLimitGuard;
pub use store::{CounterStore, MemoryStore};
pub use types::*;
pub use violation::{AlertSink, TracingAlertSink, ViolationTracker};
