//! Fetch bookkeeping for the listing view.
//!
//! Every listing fetch is tagged with a [`FetchEpoch`] when issued. Several
//! fetches may be in flight at once and may resolve in any order; only the
//! most recently issued one is allowed to touch the visible list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic identifier of an issued listing fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FetchEpoch(pub u64);

impl fmt::Display for FetchEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counts how often the listing view has been mounted. Tag vocabulary results
/// carry the generation they were requested for so a response from an earlier
/// mount cannot land in a later one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MountGeneration(pub u64);

impl MountGeneration {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MountGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount {}", self.0)
    }
}

/// Lifecycle of a single fetch: `Idle -> InFlight -> {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl FetchPhase {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// How a resolved fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Tracks the latest issued epoch and the phase of that fetch.
///
/// [`FetchTracker::resolve`] accepts a result only when its epoch is the latest
/// one and that fetch is still in flight, so each terminal state is consumed
/// exactly once and stale results are rejected.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    latest: FetchEpoch,
    phase: FetchPhase,
}

impl FetchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next epoch and marks it in flight.
    pub fn issue(&mut self) -> FetchEpoch {
        self.latest = FetchEpoch(self.latest.0 + 1);
        self.phase = FetchPhase::InFlight;
        self.latest
    }

    /// Records the outcome of `epoch`. Returns `false` (and changes nothing)
    /// for a stale epoch or a fetch already resolved.
    pub fn resolve(&mut self, epoch: FetchEpoch, outcome: Outcome) -> bool {
        if epoch != self.latest || self.phase != FetchPhase::InFlight {
            return false;
        }
        self.phase = match outcome {
            Outcome::Succeeded => FetchPhase::Succeeded,
            Outcome::Failed => FetchPhase::Failed,
        };
        true
    }

    /// Drops interest in whatever is in flight. Epochs keep counting up so
    /// late results from before the reset still compare as stale.
    pub fn reset(&mut self) {
        self.phase = FetchPhase::Idle;
    }

    #[must_use]
    pub const fn latest(&self) -> FetchEpoch {
        self.latest
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_increase_monotonically() {
        let mut tracker = FetchTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();
        assert!(b > a);
        assert_eq!(tracker.latest(), b);
        assert!(tracker.phase().is_loading());
    }

    #[test]
    fn late_result_from_older_epoch_is_rejected() {
        let mut tracker = FetchTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();

        assert!(tracker.resolve(b, Outcome::Succeeded));
        assert!(!tracker.resolve(a, Outcome::Succeeded));
        assert_eq!(tracker.phase(), FetchPhase::Succeeded);
    }

    #[test]
    fn terminal_state_is_consumed_once() {
        let mut tracker = FetchTracker::new();
        let a = tracker.issue();
        assert!(tracker.resolve(a, Outcome::Failed));
        assert!(!tracker.resolve(a, Outcome::Succeeded));
        assert_eq!(tracker.phase(), FetchPhase::Failed);
    }

    #[test]
    fn reset_keeps_old_epochs_stale() {
        let mut tracker = FetchTracker::new();
        let a = tracker.issue();
        tracker.reset();
        assert!(!tracker.resolve(a, Outcome::Succeeded));
        let b = tracker.issue();
        assert!(b > a);
    }
}
