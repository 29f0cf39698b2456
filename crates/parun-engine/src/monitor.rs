//! Child-event latch.
//!
//! The asynchronous observer for "a child has changed state". Notifiers
//! may only flip a shared flag, nothing else. Everything that acts on the
//! flag runs later, on the control task, exactly once after the launch
//! phase.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parun_types::AbortOn;

/// Set-only boolean latch recording "at least one child has terminated
/// since the run started".
///
/// The latch is armed only when the run's failure policy can act on it
/// (pipeline or halt-on-failure); a disarmed latch ignores notifications.
/// With [`AbortOn::FailureOnly`] it additionally ignores clean exits.
#[derive(Debug, Clone)]
pub(crate) struct ChildEventLatch {
    armed: bool,
    abort_on: AbortOn,
    seen: Arc<AtomicBool>,
}

impl ChildEventLatch {
    pub(crate) fn new(armed: bool, abort_on: AbortOn) -> Self {
        Self {
            armed,
            abort_on,
            seen: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record one child termination. Callable from any task.
    pub(crate) fn notify(&self, failed: bool) {
        if !self.armed {
            return;
        }
        if failed || self.abort_on == AbortOn::AnyChildEvent {
            self.seen.store(true, Ordering::Release);
        }
    }

    /// Whether the abort sequence should run.
    pub(crate) fn triggered(&self) -> bool {
        self.armed && self.seen.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_latch_never_triggers() {
        let latch = ChildEventLatch::new(false, AbortOn::AnyChildEvent);
        latch.notify(true);
        assert!(!latch.triggered());
    }

    #[test]
    fn any_event_policy_counts_clean_exits() {
        let latch = ChildEventLatch::new(true, AbortOn::AnyChildEvent);
        assert!(!latch.triggered());
        latch.notify(false);
        assert!(latch.triggered());
    }

    #[test]
    fn failure_only_policy_ignores_clean_exits() {
        let latch = ChildEventLatch::new(true, AbortOn::FailureOnly);
        latch.notify(false);
        assert!(!latch.triggered());
        latch.notify(true);
        assert!(latch.triggered());
    }
}
