/*!
 * Synchronization Primitives
 *
 * Rendezvous primitives used by demonstration coordinators.
 *
 * # Architecture
 *
 * `JoinBarrier` counts outstanding completions behind a mutex and offers both
 * a blocking wait (condvar) and an async wait (tokio `Notify`), so the same
 * barrier works from a plain thread or from inside a worker pool.
 *
 * # Use Cases
 *
 * - **Fan-out/join**: Spawn N workers, block until all have finished
 * - **Guaranteed release**: Pair with `BarrierGuard` so failing workers still report
 */

mod barrier;

pub use barrier::JoinBarrier;
