/*!
 * Concurrency Playground Library
 *
 * Join barriers, racy vs. atomic shared counters and cooperative workers on a
 * worker pool of configurable width.
 */

pub mod config;
pub mod core;
pub mod demos;
pub mod monitoring;
pub mod scheduler;

// Re-exports
pub use config::PlaygroundConfig;
pub use crate::core::errors::{BarrierError, DemoError, DemoResult};
pub use crate::core::guard::BarrierGuard;
pub use crate::core::sync::JoinBarrier;
pub use monitoring::{init_tracing, EventSink, RecordingSink, TracingSink, WorkerEvent};
pub use scheduler::{PoolConfig, WorkerPool, YieldPolicy};
