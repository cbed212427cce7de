/*!
 * Guarded Workers
 *
 * Spawning and joining workers that report to a join barrier exactly once.
 */

use crate::core::errors::{DemoError, DemoResult};
use crate::core::guard::{BarrierGuard, GuardError, GuardResult};
use crate::core::sync::JoinBarrier;
use crate::core::types::WorkerLabel;
use futures::future::join_all;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

/// Handle to a spawned worker
pub struct WorkerHandle<T> {
    label: WorkerLabel,
    handle: JoinHandle<GuardResult<T>>,
}

/// Spawn `work` as an independent worker bound to `barrier`
///
/// The worker owns a `BarrierGuard`: it reports on normal completion, and the
/// guard reports on its behalf if the task panics.
pub fn spawn_worker<F>(
    barrier: &Arc<JoinBarrier>,
    label: WorkerLabel,
    work: F,
) -> WorkerHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let done = BarrierGuard::new(barrier.clone(), label.as_str());
    debug!(worker = %label, barrier = %barrier.label(), "Spawning worker");

    let handle = tokio::spawn(async move {
        let output = work.await;
        done.complete()?;
        Ok::<_, GuardError>(output)
    });

    WorkerHandle { label, handle }
}

/// Wait on the barrier, then collect every worker's output
///
/// A panicking worker still releases the barrier; its panic surfaces here as
/// `DemoError::WorkerPanicked` naming the worker.
pub async fn join_workers<T>(
    barrier: &JoinBarrier,
    workers: Vec<WorkerHandle<T>>,
) -> DemoResult<Vec<(WorkerLabel, T)>> {
    barrier.wait_async().await;
    debug!(
        barrier = %barrier.label(),
        completed = barrier.completed(),
        "Barrier released"
    );

    let (labels, handles): (Vec<_>, Vec<_>) =
        workers.into_iter().map(|w| (w.label, w.handle)).unzip();

    let mut outputs = Vec::with_capacity(labels.len());
    for (label, joined) in labels.into_iter().zip(join_all(handles).await) {
        match joined {
            Ok(Ok(output)) => outputs.push((label, output)),
            Ok(Err(e)) => {
                error!(worker = %label, error = %e, "Worker failed to report completion");
                return Err(e.into());
            }
            Err(e) => {
                let reason = join_error_reason(e);
                error!(worker = %label, reason = %reason, "Worker terminated abnormally");
                return Err(DemoError::WorkerPanicked {
                    worker: label.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(outputs)
}

fn join_error_reason(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
