/*!
 * Demonstration Limits and Constants
 *
 * Every iteration count, bound and width used by the demonstrations lives here
 * so callers and tests can refer to them by name.
 */

// =============================================================================
// SHARED COUNTER
// =============================================================================

/// Workers racing on one shared counter
pub const COUNTER_WORKERS: usize = 2;

/// Increments performed by each counter worker
pub const COUNTER_ITERATIONS: usize = 2;

// =============================================================================
// ALPHABET PAIR
// =============================================================================

/// Full passes over the alphabet per worker
pub const ALPHABET_PASSES: usize = 3;

/// Letters per pass
pub const ALPHABET_LEN: usize = 26;

// =============================================================================
// PRIME PAIR
// =============================================================================

/// Exclusive upper bound for prime enumeration
pub const PRIME_BOUND: u64 = 5000;

/// Trial divisions between explicit yields in the prime worker
/// Keeps two workers on a single context interleaving without relying on preemption
pub const PRIME_YIELD_INTERVAL: usize = 1024;

// =============================================================================
// SCHEDULER
// =============================================================================

/// Default number of execution contexts for the worker pool
pub const DEFAULT_CONTEXTS: usize = 1;

/// Upper bound accepted from configuration
pub const MAX_CONTEXTS: usize = 256;

/// Workers in each paired demonstration (alphabet, primes)
pub const PAIR_WORKERS: usize = 2;
