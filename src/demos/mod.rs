/*!
 * Demonstrations
 *
 * - **alphabet**: independent workers joined by a barrier
 * - **primes**: CPU-bound workers interleaving at explicit yield points
 * - **counter**: racy vs. atomic increments on one shared counter
 */

pub mod alphabet;
pub mod counter;
pub mod primes;

pub use alphabet::{
    alphabet_pair, run_alphabet_pair, AlphabetReport, AlphabetSpec, AlphabetTally, Case,
};
pub use counter::{
    atomic_counter, racy_counter, run_atomic_counter, run_racy_counter, AtomicCounter,
    CounterReport, CounterSpec, RacyCounter, SharedCounter,
};
pub use primes::{
    is_prime, prime_pair, primes_below, run_prime_pair, trial_division, PrimeReport, PrimeSpec,
    PrimeTally, TrialOutcome,
};
