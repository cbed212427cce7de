/*!
 * Barrier Guards
 *
 * RAII guard that reports a worker's completion to its join barrier exactly once
 */

use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::sync::JoinBarrier;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Completion guard held by a worker for its whole run
///
/// Reports to the barrier when `complete` is called, or on drop if the worker
/// never got that far (early return, panic unwinding through the task). The
/// coordinator therefore never waits on a worker that has already died.
///
/// # Example
///
/// ```ignore
/// let done = BarrierGuard::new(barrier.clone(), "routine-1");
/// // Work
/// done.complete()?;
/// ```
pub struct BarrierGuard {
    barrier: Option<Arc<JoinBarrier>>,
    metadata: GuardMetadata,
}

impl BarrierGuard {
    pub fn new(barrier: Arc<JoinBarrier>, owner: impl Into<String>) -> Self {
        Self {
            barrier: Some(barrier),
            metadata: GuardMetadata::new("join_barrier").with_owner(owner),
        }
    }

    /// Report completion now and consume the guard
    pub fn complete(mut self) -> GuardResult<()> {
        self.release()
    }

    fn owner(&self) -> &str {
        self.metadata.owner.as_deref().unwrap_or("unknown")
    }
}

impl Guard for BarrierGuard {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.barrier.is_some()
    }

    fn release(&mut self) -> GuardResult<()> {
        let barrier = self.barrier.take().ok_or(GuardError::AlreadyReleased)?;
        let remaining = barrier.report_done()?;
        debug!(
            resource = self.resource_type(),
            worker = %self.owner(),
            remaining,
            lifetime_micros = self.metadata().lifetime_micros(),
            "Guard released"
        );
        Ok(())
    }
}

impl GuardDrop for BarrierGuard {
    fn on_drop(&mut self) {
        if !self.is_active() {
            return;
        }

        if std::thread::panicking() {
            warn!(
                resource = self.resource_type(),
                worker = %self.owner(),
                lifetime_micros = self.metadata().lifetime_micros(),
                "Worker unwinding, reporting completion from guard"
            );
        }

        if let Err(e) = self.release() {
            error!(worker = %self.owner(), error = %e, "Failed to report completion on drop");
        }
    }
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        self.on_drop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;

    #[test]
    fn test_complete_reports_once() {
        let barrier = JoinBarrier::shared("guarded", 1);
        let guard = BarrierGuard::new(barrier.clone(), "w1");
        assert!(guard.is_active());
        assert_eq!(guard.resource_type(), "join_barrier");
        assert_eq!(guard.metadata().owner.as_deref(), Some("w1"));

        guard.complete().unwrap();
        assert!(barrier.is_complete());
        assert_eq!(barrier.completed(), 1);
    }

    #[test]
    fn test_drop_reports() {
        let barrier = JoinBarrier::shared("dropped", 2);
        {
            let _a = BarrierGuard::new(barrier.clone(), "a");
            let _b = BarrierGuard::new(barrier.clone(), "b");
        }
        assert_eq!(barrier.remaining(), 0);
    }

    #[test]
    fn test_panic_still_reports() {
        let barrier = JoinBarrier::shared("panicky", 1);
        let barrier_clone = barrier.clone();

        let result = panic::catch_unwind(panic::AssertUnwindSafe(move || {
            let _done = BarrierGuard::new(barrier_clone, "doomed");
            panic!("worker failed");
        }));

        assert!(result.is_err());
        assert!(barrier.is_complete());
    }

    #[test]
    fn test_over_report_surfaces_from_complete() {
        let barrier = JoinBarrier::shared("tight", 1);
        let first = BarrierGuard::new(barrier.clone(), "first");
        let second = BarrierGuard::new(barrier.clone(), "second");

        first.complete().unwrap();
        let err = second.complete().unwrap_err();
        assert!(matches!(err, GuardError::Barrier(_)));
    }
}
