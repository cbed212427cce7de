/*!
 * Core Module
 * Fundamental types, constants, error handling and synchronization primitives
 */

pub mod errors;
pub mod guard;
pub mod limits;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{BarrierGuard, Guard, GuardDrop, GuardError, GuardResult};
pub use sync::JoinBarrier;
pub use types::*;
