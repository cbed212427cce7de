/*!
 * Worker Events
 *
 * Progress events emitted by workers and coordinators, and the sinks that
 * consume them. Ordering across workers is whatever the scheduler produced.
 */

use crate::core::types::WorkerLabel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A single progress event from one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkerEvent {
    Started { worker: WorkerLabel },
    Yielded { worker: WorkerLabel },
    Resumed { worker: WorkerLabel },
    CounterValue { worker: WorkerLabel, value: i64 },
    Prime { worker: WorkerLabel, value: u64 },
    Char { worker: WorkerLabel, ch: char },
    PassSeparator { worker: WorkerLabel, pass: usize },
    Completed { worker: WorkerLabel },
}

impl WorkerEvent {
    pub fn worker(&self) -> &WorkerLabel {
        match self {
            Self::Started { worker }
            | Self::Yielded { worker }
            | Self::Resumed { worker }
            | Self::CounterValue { worker, .. }
            | Self::Prime { worker, .. }
            | Self::Char { worker, .. }
            | Self::PassSeparator { worker, .. }
            | Self::Completed { worker } => worker,
        }
    }
}

/// Sequential sink for worker events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: WorkerEvent);
}

/// Writes human-readable progress lines through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: WorkerEvent) {
        match event {
            WorkerEvent::Started { worker } => info!(worker = %worker, "Worker started"),
            WorkerEvent::Yielded { worker } => info!(worker = %worker, "Yielding context"),
            WorkerEvent::Resumed { worker } => info!(worker = %worker, "Running again"),
            WorkerEvent::CounterValue { worker, value } => {
                info!(worker = %worker, value, "Counter value")
            }
            WorkerEvent::Prime { worker, value } => info!("{}:{}", worker, value),
            WorkerEvent::Char { worker, ch } => info!(worker = %worker, "{}", ch),
            WorkerEvent::PassSeparator { worker, pass } => {
                info!(worker = %worker, pass, "-")
            }
            WorkerEvent::Completed { worker } => info!(worker = %worker, "Completed"),
        }
    }
}

/// Keeps every event in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<WorkerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<WorkerEvent> {
        self.events.lock().clone()
    }

    /// Events emitted by one worker, in that worker's order
    pub fn for_worker(&self, worker: &str) -> Vec<WorkerEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.worker().as_str() == worker)
            .cloned()
            .collect()
    }

    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&WorkerEvent) -> bool,
    {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: WorkerEvent) {
        self.events.lock().push(event);
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: WorkerEvent) {}
}
