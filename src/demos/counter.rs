/*!
 * Shared Counter
 *
 * Two ways for concurrent workers to increment one shared integer:
 *
 * - `RacyCounter`: read, (maybe yield), add one locally, write back. Each
 *   access is an individual relaxed atomic load or store, so there is no
 *   undefined behavior, but the read-modify-write as a whole is not atomic
 *   and increments can be lost.
 * - `AtomicCounter`: one `fetch_add` per increment. No increment is ever lost.
 *
 * The counter is an explicit shared handle (`Arc`) owned by the coordinator
 * and its workers, never a global.
 */

use crate::core::errors::DemoResult;
use crate::core::limits::{COUNTER_ITERATIONS, COUNTER_WORKERS};
use crate::core::sync::JoinBarrier;
use crate::core::types::WorkerLabel;
use crate::monitoring::{DemoSpan, EventSink, WorkerEvent};
use crate::scheduler::{join_workers, spawn_worker, yield_now, WorkerPool, YieldPoint, YieldPolicy};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{info, Instrument};

/// A counter shared by every worker of one run
pub trait SharedCounter: Send + Sync + 'static {
    /// Current value
    fn value(&self) -> i64;

    /// Whether increments are indivisible
    fn is_synchronized(&self) -> bool;
}

/// Counter incremented with a separate read and write
#[derive(Debug, Default)]
pub struct RacyCounter {
    value: AtomicI64,
}

impl RacyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }
}

impl SharedCounter for RacyCounter {
    fn value(&self) -> i64 {
        self.read()
    }

    fn is_synchronized(&self) -> bool {
        false
    }
}

/// Counter incremented with a single fetch-and-add
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicI64,
}

impl AtomicCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value
    #[inline]
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl SharedCounter for AtomicCounter {
    fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    fn is_synchronized(&self) -> bool {
        true
    }
}

/// Shape of one counter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub workers: usize,
    pub iterations: usize,
    /// Yield policy applied at the point after each read (racy) or increment (atomic)
    pub policy: YieldPolicy,
}

impl Default for CounterSpec {
    fn default() -> Self {
        Self {
            workers: COUNTER_WORKERS,
            iterations: COUNTER_ITERATIONS,
            policy: YieldPolicy::Always,
        }
    }
}

impl CounterSpec {
    /// Increments a run would perform if none were lost
    pub fn expected_total(&self) -> i64 {
        (self.workers * self.iterations) as i64
    }
}

/// Outcome of one counter run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterReport {
    pub synchronized: bool,
    pub workers: usize,
    pub iterations: usize,
    pub expected: i64,
    pub observed: i64,
    pub lost_updates: i64,
}

impl CounterReport {
    pub fn lost_any(&self) -> bool {
        self.lost_updates > 0
    }
}

/// One racy worker: read, yield, increment locally, write back
pub async fn racy_increment(
    worker: WorkerLabel,
    counter: Arc<RacyCounter>,
    iterations: usize,
    policy: YieldPolicy,
    sink: Arc<dyn EventSink>,
) {
    sink.emit(WorkerEvent::Started { worker: worker.clone() });
    let mut point = YieldPoint::new(policy);

    for _ in 0..iterations {
        let mut value = counter.read();

        if point.advance(1) {
            sink.emit(WorkerEvent::Yielded { worker: worker.clone() });
            yield_now().await;
            sink.emit(WorkerEvent::Resumed { worker: worker.clone() });
        }

        value += 1;
        counter.write(value);

        sink.emit(WorkerEvent::CounterValue {
            worker: worker.clone(),
            value: counter.read(),
        });
    }

    sink.emit(WorkerEvent::Completed { worker });
}

/// One atomic worker: fetch-and-add, then yield
pub async fn atomic_increment(
    worker: WorkerLabel,
    counter: Arc<AtomicCounter>,
    iterations: usize,
    policy: YieldPolicy,
    sink: Arc<dyn EventSink>,
) {
    sink.emit(WorkerEvent::Started { worker: worker.clone() });
    let mut point = YieldPoint::new(policy);

    for _ in 0..iterations {
        let value = counter.increment();
        sink.emit(WorkerEvent::CounterValue {
            worker: worker.clone(),
            value,
        });

        if point.advance(1) {
            sink.emit(WorkerEvent::Yielded { worker: worker.clone() });
            yield_now().await;
            sink.emit(WorkerEvent::Resumed { worker: worker.clone() });
        }
    }

    sink.emit(WorkerEvent::Completed { worker });
}

async fn coordinate<C, W, Fut>(
    barrier_label: &'static str,
    counter: Arc<C>,
    spec: CounterSpec,
    sink: Arc<dyn EventSink>,
    work: W,
) -> DemoResult<CounterReport>
where
    C: SharedCounter,
    W: Fn(WorkerLabel, Arc<C>, usize, YieldPolicy, Arc<dyn EventSink>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let barrier = JoinBarrier::shared(barrier_label, spec.workers);

    let workers = (1..=spec.workers)
        .map(|id| {
            let label = WorkerLabel::numbered("routine", id);
            let fut = work(
                label.clone(),
                counter.clone(),
                spec.iterations,
                spec.policy,
                sink.clone(),
            );
            spawn_worker(&barrier, label, fut)
        })
        .collect();

    join_workers(&barrier, workers).await?;

    let observed = counter.value();
    let expected = spec.expected_total();
    let report = CounterReport {
        synchronized: counter.is_synchronized(),
        workers: spec.workers,
        iterations: spec.iterations,
        expected,
        observed,
        lost_updates: expected - observed,
    };

    info!(
        synchronized = report.synchronized,
        expected,
        observed,
        lost = report.lost_updates,
        "Final counter"
    );
    Ok(report)
}

/// Race `spec.workers` workers on a fresh unsynchronized counter
pub async fn racy_counter(
    spec: CounterSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<CounterReport> {
    let counter = Arc::new(RacyCounter::new());
    coordinate("racy-counter", counter, spec, sink, racy_increment).await
}

/// Same shape as `racy_counter`, but every increment is a fetch-and-add
pub async fn atomic_counter(
    spec: CounterSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<CounterReport> {
    let counter = Arc::new(AtomicCounter::new());
    coordinate("atomic-counter", counter, spec, sink, atomic_increment).await
}

/// Run the racy counter on `pool`
pub fn run_racy_counter(
    pool: &WorkerPool,
    spec: CounterSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<CounterReport> {
    let span = DemoSpan::new("racy_counter", pool.contexts());
    let instrumented = span.span().clone();
    pool.run(racy_counter(spec, sink).instrument(instrumented))
}

/// Run the atomic counter on `pool`
pub fn run_atomic_counter(
    pool: &WorkerPool,
    spec: CounterSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<CounterReport> {
    let span = DemoSpan::new("atomic_counter", pool.contexts());
    let instrumented = span.span().clone();
    pool.run(atomic_counter(spec, sink).instrument(instrumented))
}
