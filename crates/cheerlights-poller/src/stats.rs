//! Poll counters shared between the poller and its spawned poll tasks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the poll counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Fetches issued (scheduled, immediate, and manual).
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
}

impl PollStats {
    /// Fetches issued but not yet resolved (or aborted).
    pub fn unresolved(&self) -> u64 {
        self.attempts
            .saturating_sub(self.successes)
            .saturating_sub(self.failures)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    attempts: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
}

impl Counters {
    pub(crate) fn attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PollStats {
        PollStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counters() {
        let c = Counters::default();
        c.attempt();
        c.attempt();
        c.attempt();
        c.success();
        c.failure();
        let s = c.snapshot();
        assert_eq!(
            s,
            PollStats {
                attempts: 3,
                successes: 1,
                failures: 1
            }
        );
        assert_eq!(s.unresolved(), 1);
    }

    #[test]
    fn unresolved_never_underflows() {
        let s = PollStats {
            attempts: 0,
            successes: 1,
            failures: 0,
        };
        assert_eq!(s.unresolved(), 0);
    }
}
