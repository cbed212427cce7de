/*!
 * Concurrency Playground - Main Entry Point
 *
 * Runs each demonstration in turn on one worker pool:
 * - Alphabet pair joined by a barrier
 * - Cooperative prime workers
 * - Racy shared counter
 * - Atomic shared counter
 */

use concurrency_playground::demos::{
    run_alphabet_pair, run_atomic_counter, run_prime_pair, run_racy_counter,
};
use concurrency_playground::{init_tracing, EventSink, PlaygroundConfig, TracingSink, WorkerPool};
use miette::IntoDiagnostic;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = PlaygroundConfig::from_env()?;
    info!(
        contexts = config.pool.contexts,
        race_yield = %config.counter.policy,
        prime_yield = %config.primes.policy,
        "Playground starting"
    );

    let pool = WorkerPool::new(config.pool)?;
    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);

    info!("Start alphabet workers");
    let alphabet = run_alphabet_pair(&pool, config.alphabet, sink.clone())?;
    emit_report(config.report_json, "alphabet_pair", &alphabet)?;

    info!("Rescheduling runner");
    let primes = run_prime_pair(&pool, config.primes, sink.clone())?;
    emit_report(config.report_json, "prime_pair", &primes)?;

    info!("Building race condition");
    let racy = run_racy_counter(&pool, config.counter, sink.clone())?;
    emit_report(config.report_json, "racy_counter", &racy)?;

    info!("Fixing race condition");
    let atomic = run_atomic_counter(&pool, config.counter, sink)?;
    emit_report(config.report_json, "atomic_counter", &atomic)?;

    info!(
        racy_final = racy.observed,
        atomic_final = atomic.observed,
        expected = atomic.expected,
        "Playground finished"
    );
    Ok(())
}

fn emit_report<T: Serialize>(enabled: bool, demo: &str, report: &T) -> miette::Result<()> {
    if enabled {
        let line = serde_json::to_string(report).into_diagnostic()?;
        println!("{{\"demo\":\"{}\",\"report\":{}}}", demo, line);
    }
    Ok(())
}
