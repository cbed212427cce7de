/*!
 * RAII Resource Guards
 *
 * Guards that release a resource exactly once, either explicitly or when the
 * owning scope ends (including unwinding from a panic).
 *
 * ## Guard Types
 *
 * - **BarrierGuard**: Reports a worker's completion to its `JoinBarrier`
 *
 * ## Example
 *
 * ```ignore
 * use concurrency_playground::core::guard::BarrierGuard;
 * use concurrency_playground::core::sync::JoinBarrier;
 *
 * let barrier = JoinBarrier::shared("batch", 1);
 * {
 *     let _done = BarrierGuard::new(barrier.clone(), "worker-1");
 *     // Work
 * } // Completion reported on drop
 * barrier.wait();
 * ```
 */

mod barrier;
mod traits;

pub use barrier::BarrierGuard;
pub use traits::{Guard, GuardDrop};

use crate::core::errors::BarrierError;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,

    #[error("Release failed: {0}")]
    Barrier(#[from] BarrierError),
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
    pub owner: Option<String>,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
            owner: None,
        }
    }

    #[inline]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
