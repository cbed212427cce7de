/*!
 * Join Barrier
 *
 * Counter-based rendezvous: a coordinator registers how many completions it
 * expects and blocks until every worker has reported.
 */

use crate::core::errors::BarrierError;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, error};

#[derive(Debug)]
struct BarrierState {
    expected: usize,
    remaining: usize,
}

/// Join barrier for a batch of workers
///
/// # Synchronization
///
/// - The count lives behind a `parking_lot::Mutex`, so concurrent reports are
///   never lost or double counted
/// - Every `report_done` happens-before the return of `wait`/`wait_async`
/// - Blocking waiters park on a `Condvar`; async waiters use `tokio::sync::Notify`
///   so a coordinator running inside a single-context pool does not starve its
///   own workers
///
/// # Examples
///
/// ```
/// use concurrency_playground::core::sync::JoinBarrier;
/// use std::thread;
///
/// let barrier = JoinBarrier::shared("workers", 2);
/// let handles: Vec<_> = (0..2)
///     .map(|_| {
///         let barrier = barrier.clone();
///         thread::spawn(move || barrier.report_done().unwrap())
///     })
///     .collect();
///
/// barrier.wait();
/// assert_eq!(barrier.remaining(), 0);
/// # for h in handles { h.join().unwrap(); }
/// ```
#[derive(Debug)]
pub struct JoinBarrier {
    label: String,
    state: Mutex<BarrierState>,
    condvar: Condvar,
    notify: Notify,
}

impl JoinBarrier {
    /// Create a barrier expecting `expected` completions
    pub fn new(label: impl Into<String>, expected: usize) -> Self {
        Self {
            label: label.into(),
            state: Mutex::new(BarrierState {
                expected,
                remaining: expected,
            }),
            condvar: Condvar::new(),
            notify: Notify::new(),
        }
    }

    /// Create a barrier already wrapped for sharing with workers
    pub fn shared(label: impl Into<String>, expected: usize) -> Arc<Self> {
        Arc::new(Self::new(label, expected))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn expected(&self) -> usize {
        self.state.lock().expected
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().remaining
    }

    /// Completions reported so far
    pub fn completed(&self) -> usize {
        let state = self.state.lock();
        state.expected - state.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.state.lock().remaining == 0
    }

    /// Report one completion
    ///
    /// Returns the number of completions still outstanding. Reporting past
    /// zero leaves the count untouched and returns `BarrierError::OverReport`.
    pub fn report_done(&self) -> Result<usize, BarrierError> {
        let mut state = self.state.lock();

        if state.remaining == 0 {
            error!(
                barrier = %self.label,
                expected = state.expected,
                "Completion reported to a barrier with nothing outstanding"
            );
            return Err(BarrierError::OverReport {
                barrier: self.label.clone(),
                expected: state.expected,
            });
        }

        state.remaining -= 1;
        let remaining = state.remaining;
        debug!(barrier = %self.label, remaining, "Completion reported");

        if remaining == 0 {
            self.condvar.notify_all();
            self.notify.notify_waiters();
        }

        Ok(remaining)
    }

    /// Block the calling thread until every expected completion is reported
    ///
    /// Returns immediately for a barrier created with `expected == 0`.
    pub fn wait(&self) {
        let mut state = self.state.lock();
        while state.remaining > 0 {
            self.condvar.wait(&mut state);
        }
    }

    /// Suspend the calling task until every expected completion is reported
    pub async fn wait_async(&self) {
        loop {
            // Register interest before checking so a concurrent final report
            // cannot slip between the check and the await
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_complete() {
                return;
            }

            notified.await;
        }
    }

    /// Re-arm a drained barrier for another batch of workers
    pub fn rearm(&self, expected: usize) -> Result<(), BarrierError> {
        let mut state = self.state.lock();
        if state.remaining != 0 {
            return Err(BarrierError::StillArmed {
                barrier: self.label.clone(),
                remaining: state.remaining,
            });
        }

        state.expected = expected;
        state.remaining = expected;
        debug!(barrier = %self.label, expected, "Barrier re-armed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_expected_returns_immediately() {
        let barrier = JoinBarrier::new("empty", 0);
        barrier.wait();
        assert!(barrier.is_complete());
        assert_eq!(barrier.completed(), 0);
    }

    #[test]
    fn test_report_counts_down() {
        let barrier = JoinBarrier::new("countdown", 3);
        assert_eq!(barrier.report_done(), Ok(2));
        assert_eq!(barrier.report_done(), Ok(1));
        assert_eq!(barrier.report_done(), Ok(0));
        assert_eq!(barrier.completed(), 3);
    }

    #[test]
    fn test_over_report_leaves_state_untouched() {
        let barrier = JoinBarrier::new("strict", 1);
        barrier.report_done().unwrap();

        let err = barrier.report_done().unwrap_err();
        assert_eq!(
            err,
            BarrierError::OverReport {
                barrier: "strict".to_string(),
                expected: 1,
            }
        );
        assert_eq!(barrier.remaining(), 0);
        assert_eq!(barrier.completed(), 1);
    }

    #[test]
    fn test_wait_blocks_until_last_report() {
        let barrier = JoinBarrier::shared("blocking", 2);
        let barrier_clone = barrier.clone();

        let handle = thread::spawn(move || {
            barrier_clone.wait();
            barrier_clone.remaining()
        });

        // Give thread time to park
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());

        barrier.report_done().unwrap();
        thread::sleep(Duration::from_millis(20));
        assert!(!handle.is_finished());

        barrier.report_done().unwrap();
        assert_eq!(handle.join().unwrap(), 0);
    }

    #[test]
    fn test_rearm_requires_drained_barrier() {
        let barrier = JoinBarrier::new("reuse", 1);
        assert!(matches!(
            barrier.rearm(4),
            Err(BarrierError::StillArmed { remaining: 1, .. })
        ));

        barrier.report_done().unwrap();
        barrier.rearm(2).unwrap();
        assert_eq!(barrier.expected(), 2);
        assert_eq!(barrier.remaining(), 2);
    }

    #[test]
    fn test_wait_async_on_current_thread() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let barrier = JoinBarrier::shared("async", 2);
        let completed = runtime.block_on(async {
            for _ in 0..2 {
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    barrier.report_done().unwrap();
                });
            }
            barrier.wait_async().await;
            barrier.completed()
        });

        assert_eq!(completed, 2);
    }
}
