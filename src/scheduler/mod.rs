/*!
 * Scheduler Module
 * Worker pool sizing, cooperative yielding and guarded worker lifecycle
 */

pub mod pool;
pub mod types;
pub mod worker;

// Re-export public API
pub use pool::{yield_now, WorkerPool};
pub use types::{PoolConfig, YieldPoint, YieldPolicy};
pub use worker::{join_workers, spawn_worker, WorkerHandle};
