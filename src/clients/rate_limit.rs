//! Rate-limit state shared by the REST and GraphQL engines of one client.
//!
//! REST and GraphQL report headroom in different units (bucket slots vs. cost
//! points), so each reading is stored together with the model it came from.
//! An engine compares the reading it has just recorded, or, when a response
//! carries none, the latest stored reading of its own model.

use std::sync::{Mutex, MutexGuard};

/// The unit an `available` reading is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleModel {
    /// REST call bucket slots.
    CallBucket,
    /// GraphQL cost points.
    CostBudget,
}

/// A single headroom reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitReading {
    /// Which engine produced the reading.
    pub model: ThrottleModel,
    /// Remaining slots or points.
    pub available: u32,
}

/// Latest headroom reading for a client, behind a mutex.
///
/// The guard is only ever held for the duration of a read or an
/// update-and-compare, never across an `.await`.
#[derive(Debug, Default)]
pub struct RateLimitState {
    latest: Mutex<Option<RateLimitReading>>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimitState>();
};

impl RateLimitState {
    /// Creates an empty state. No reading means no proactive wait.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest reading, if any.
    #[must_use]
    pub fn current(&self) -> Option<RateLimitReading> {
        *self.lock()
    }

    /// Records a reading and reports whether it is below `threshold`.
    ///
    /// The update and the comparison happen under one lock acquisition so
    /// concurrent calls cannot interleave between them.
    pub fn record(&self, model: ThrottleModel, available: u32, threshold: u32) -> bool {
        let mut latest = self.lock();
        *latest = Some(RateLimitReading { model, available });
        tracing::debug!(?model, available, "rate limit reading updated");
        available < threshold
    }

    /// Reports whether the latest stored reading of `model` is below
    /// `threshold`.
    ///
    /// A reading of the other model, or no reading at all, is never low.
    #[must_use]
    pub fn is_below(&self, model: ThrottleModel, threshold: u32) -> bool {
        self.lock()
            .is_some_and(|reading| reading.model == model && reading.available < threshold)
    }

    fn lock(&self) -> MutexGuard<'_, Option<RateLimitReading>> {
        // A panic elsewhere cannot leave a half-written reading.
        self.latest
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_state_has_no_reading() {
        let state = RateLimitState::new();
        assert!(state.current().is_none());
    }

    #[test]
    fn test_record_compares_against_threshold() {
        let state = RateLimitState::new();
        assert!(state.record(ThrottleModel::CallBucket, 1, 2));
        assert!(!state.record(ThrottleModel::CallBucket, 2, 2));
        assert_eq!(
            state.current(),
            Some(RateLimitReading {
                model: ThrottleModel::CallBucket,
                available: 2
            })
        );
    }

    #[test]
    fn test_latest_reading_replaces_other_model() {
        let state = RateLimitState::new();
        state.record(ThrottleModel::CallBucket, 1, 2);
        assert!(!state.record(ThrottleModel::CostBudget, 900, 50));

        let reading = state.current().unwrap();
        assert_eq!(reading.model, ThrottleModel::CostBudget);
        assert_eq!(reading.available, 900);
    }

    #[test]
    fn test_is_below_reads_latest_reading_of_same_model() {
        let state = RateLimitState::new();
        assert!(!state.is_below(ThrottleModel::CostBudget, 50));

        state.record(ThrottleModel::CostBudget, 10, 50);
        assert!(state.is_below(ThrottleModel::CostBudget, 50));
        assert!(!state.is_below(ThrottleModel::CostBudget, 10));
        assert!(!state.is_below(ThrottleModel::CallBucket, 50));

        state.record(ThrottleModel::CallBucket, 1, 2);
        assert!(!state.is_below(ThrottleModel::CostBudget, 50));
        assert!(state.is_below(ThrottleModel::CallBucket, 2));
    }

    #[test]
    fn test_concurrent_updates_keep_last_writer() {
        let state = Arc::new(RateLimitState::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        state.record(ThrottleModel::CostBudget, i, 50);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reading = state.current().unwrap();
        assert_eq!(reading.model, ThrottleModel::CostBudget);
        assert!(reading.available < 8);
    }
}
