/*!
 * Alphabet Workers
 *
 * Two independent workers print the alphabet a few times each. They share no
 * state; the join barrier is their only coordination, so their output
 * interleaves arbitrarily while the join itself is deterministic.
 */

use crate::core::errors::DemoResult;
use crate::core::limits::{ALPHABET_PASSES, PAIR_WORKERS};
use crate::core::sync::JoinBarrier;
use crate::core::types::WorkerLabel;
use crate::monitoring::{DemoSpan, EventSink, WorkerEvent};
use crate::scheduler::{join_workers, spawn_worker, yield_now, WorkerPool, YieldPoint, YieldPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, Instrument};

/// Which half of the alphabet a worker prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
    Lower,
    Upper,
}

impl Case {
    pub fn letters(self) -> impl Iterator<Item = char> {
        match self {
            Self::Lower => 'a'..='z',
            Self::Upper => 'A'..='Z',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lower => "lowercase",
            Self::Upper => "uppercase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetSpec {
    pub passes: usize,
    /// Yield policy applied after each printed character
    pub policy: YieldPolicy,
}

impl Default for AlphabetSpec {
    fn default() -> Self {
        Self {
            passes: ALPHABET_PASSES,
            policy: YieldPolicy::Never,
        }
    }
}

/// What one alphabet worker printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetTally {
    pub worker: WorkerLabel,
    pub case: Case,
    pub chars: usize,
    pub separators: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetReport {
    pub passes: usize,
    pub workers: Vec<AlphabetTally>,
    pub barrier_completions: usize,
}

pub async fn alphabet_worker(
    worker: WorkerLabel,
    case: Case,
    passes: usize,
    policy: YieldPolicy,
    sink: Arc<dyn EventSink>,
) -> AlphabetTally {
    sink.emit(WorkerEvent::Started { worker: worker.clone() });
    let mut point = YieldPoint::new(policy);
    let mut chars = 0;
    let mut separators = 0;

    for pass in 0..passes {
        for ch in case.letters() {
            sink.emit(WorkerEvent::Char {
                worker: worker.clone(),
                ch,
            });
            chars += 1;

            if point.advance(1) {
                yield_now().await;
            }
        }
        sink.emit(WorkerEvent::PassSeparator {
            worker: worker.clone(),
            pass,
        });
        separators += 1;
    }

    sink.emit(WorkerEvent::Completed { worker: worker.clone() });
    AlphabetTally {
        worker,
        case,
        chars,
        separators,
    }
}

/// Run the lowercase and uppercase workers and wait for both
pub async fn alphabet_pair(
    spec: AlphabetSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<AlphabetReport> {
    let barrier = JoinBarrier::shared("alphabet-pair", PAIR_WORKERS);

    let workers = [Case::Lower, Case::Upper]
        .into_iter()
        .map(|case| {
            let label = WorkerLabel::new(case.label());
            let fut = alphabet_worker(label.clone(), case, spec.passes, spec.policy, sink.clone());
            spawn_worker(&barrier, label, fut)
        })
        .collect();

    info!("Waiting for alphabet workers");
    let tallies = join_workers(&barrier, workers).await?;

    let report = AlphabetReport {
        passes: spec.passes,
        workers: tallies.into_iter().map(|(_, tally)| tally).collect(),
        barrier_completions: barrier.completed(),
    };
    info!(completions = report.barrier_completions, "Alphabet workers finished");
    Ok(report)
}

pub fn run_alphabet_pair(
    pool: &WorkerPool,
    spec: AlphabetSpec,
    sink: Arc<dyn EventSink>,
) -> DemoResult<AlphabetReport> {
    let span = DemoSpan::new("alphabet_pair", pool.contexts());
    let instrumented = span.span().clone();
    pool.run(alphabet_pair(spec, sink).instrument(instrumented))
}
