/*!
 * Worker Pool
 *
 * Tokio runtime sized to a configurable number of execution contexts. One
 * context maps to a current-thread runtime, so spawned workers only ever
 * interleave at their own await points; wider pools use the multi-threaded
 * scheduler with exactly `contexts` worker threads.
 */

use super::types::PoolConfig;
use crate::core::errors::DemoResult;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

pub struct WorkerPool {
    runtime: Runtime,
    config: PoolConfig,
}

impl WorkerPool {
    pub fn new(config: PoolConfig) -> DemoResult<Self> {
        config.validate()?;

        let runtime = if config.contexts == 1 {
            Builder::new_current_thread()
                .thread_name("playground-worker")
                .build()?
        } else {
            Builder::new_multi_thread()
                .worker_threads(config.contexts)
                .thread_name("playground-worker")
                .build()?
        };

        debug!(contexts = config.contexts, "Worker pool started");
        Ok(Self { runtime, config })
    }

    /// Single-context pool
    pub fn single() -> DemoResult<Self> {
        Self::new(PoolConfig::single())
    }

    pub fn contexts(&self) -> usize {
        self.config.contexts
    }

    /// Drive a coordinator future to completion on this pool
    ///
    /// Workers spawned with `tokio::spawn` from inside `coordinator` run on
    /// the pool's contexts.
    pub fn run<F>(&self, coordinator: F) -> F::Output
    where
        F: Future,
    {
        self.runtime.block_on(coordinator)
    }
}

/// Give up the current execution context without blocking on any resource
///
/// The calling worker is placed back in the run queue behind every other
/// ready worker.
pub async fn yield_now() {
    tokio::task::yield_now().await;
}
