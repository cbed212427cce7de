/*!
 * Cooperative Prime Workers
 *
 * Two CPU-bound workers enumerate primes below a bound by naive trial
 * division. On a single execution context they only interleave at explicit
 * yield points, placed every `PRIME_YIELD_INTERVAL` trial divisions by default.
 */

use crate::core::errors::DemoResult;
use crate::core::limits::{PAIR_WORKERS, PRIME_BOUND, PRIME_YIELD_INTERVAL};
use crate::core::sync::JoinBarrier;
use crate::core::types::WorkerLabel;
use crate::monitoring::{DemoSpan, EventSink, WorkerEvent};
use crate::scheduler::{join_workers, spawn_worker, yield_now, WorkerPool, YieldPoint, YieldPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, Instrument};

/// Result of testing one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub prime: bool,
    /// Divisions performed before a verdict was reached
    pub divisions: usize,
}

/// Trial-divide `n` by every integer in `[2, n)`, stopping at the first divisor
pub fn trial_division(n: u64) -> TrialOutcome {
    if n < 2 {
        return TrialOutcome {
            prime: false,
            divisions: 0,
        };
    }

    let mut divisions = 0;
    for divisor in 2..n {
        divisions += 1;
        if n % divisor == 0 {
            return TrialOutcome {
                prime: false,
                divisions,
            };
        }
    }

    TrialOutcome {
        prime: true,
        divisions,
    }
}

#[inline]
pub fn is_prime(n: u64) -> bool {
    trial_division(n).prime
}

/// Every prime in `[2, bound)`, ascending
pub fn primes_below(bound: u64) -> Vec<u64> {
    (2..bound).filter(|n| is_prime(*n)).collect()
}

/// Shape of one prime-pair run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeSpec {
    pub bound: u64,
    pub policy: YieldPolicy,
}

impl Default for PrimeSpec {
    fn default() -> Self {
        Self {
            bound: PRIME_BOUND,
            policy: YieldPolicy::Every(PRIME_YIELD_INTERVAL),
        }
    }
}

/// What one prime worker found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeTally {
    pub worker: WorkerLabel,
    pub primes_found: usize,
    pub largest: Option<u64>,
    pub yields: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeReport {
    pub bound: u64,
    pub workers: Vec<PrimeTally>,
    pub barrier_completions: usize,
}

/// Enumerate primes below `bound`, emitting each one tagged with `worker`
pub async fn prime_worker(
    worker: WorkerLabel,
    bound: u64,
    policy: YieldPolicy,
    sink: Arc<dyn EventSink>,
) -> PrimeTally {
    sink.emit(WorkerEvent::Started { worker: worker.clone() });
    let mut point = YieldPoint::new(policy);
    let mut primes_found = 0;
    let mut largest = None;

    for candidate in 2..bound {
        let outcome = trial_division(candidate);
        if outcome.prime {
            primes_found += 1;
            largest = Some(candidate);
            sink.emit(WorkerEvent::Prime {
                worker: worker.clone(),
                value: candidate,
            });
        }

        if point.advance(outcome.divisions) {
            yield_now().await;
        }
    }

    sink.emit(WorkerEvent::Completed { worker: worker.clone() });
    PrimeTally {
        worker,
        primes_found,
        largest,
        yields: point.yields(),
    }
}

/// Run workers `A` and `B` side by side and wait for both
pub async fn prime_pair(spec: PrimeSpec, sink: Arc<dyn EventSink>) -> DemoResult<PrimeReport> {
    let barrier = JoinBarrier::shared("prime-pair", PAIR_WORKERS);

    let workers = ["A", "B"]
        .into_iter()
        .map(|label| {
            let label = WorkerLabel::new(label);
            let fut = prime_worker(label.clone(), spec.bound, spec.policy, sink.clone());
            spawn_worker(&barrier, label, fut)
        })
        .collect();

    info!("Waiting for prime workers");
    let tallies = join_workers(&barrier, workers).await?;

    let report = PrimeReport {
        bound: spec.bound,
        workers: tallies.into_iter().map(|(_, tally)| tally).collect(),
        barrier_completions: barrier.completed(),
    };
    info!(completions = report.barrier_completions, "Prime workers finished");
    Ok(report)
}

pub fn run_prime_pair(
    pool: &WorkerPool,
    spec: PrimeSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<PrimeReport> {
    let span = DemoSpan::new("prime_pair", pool.contexts());
    let instrumented = span.span().clone();
    pool.run(prime_pair(spec, sink).instrument(instrumented))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::NullSink;

    #[test]
    fn test_is_prime_small_values() {
        let expected: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];
        assert_eq!(primes_below(30), expected);
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(4999));
        assert!(!is_prime(4997)); // 19 * 263
    }

    #[test]
    fn test_trial_division_stops_at_first_divisor() {
        assert_eq!(
            trial_division(9),
            TrialOutcome {
                prime: false,
                divisions: 2
            }
        );
        assert_eq!(
            trial_division(7),
            TrialOutcome {
                prime: true,
                divisions: 5
            }
        );
    }

    #[test]
    fn test_prime_count_below_bound() {
        // pi(5000) = 669
        assert_eq!(primes_below(PRIME_BOUND).len(), 669);
    }

    #[test]
    fn test_small_pair_yields_and_joins() {
        let pool = WorkerPool::single().unwrap();
        let spec = PrimeSpec {
            bound: 200,
            policy: YieldPolicy::Every(50),
        };
        let report = run_prime_pair(&pool, spec, Arc::new(NullSink)).unwrap();

        assert_eq!(report.barrier_completions, 2);
        assert_eq!(report.workers.len(), 2);
        for tally in &report.workers {
            assert_eq!(tally.primes_found, 46);
            assert_eq!(tally.largest, Some(199));
            assert!(tally.yields > 0);
        }
    }
}
