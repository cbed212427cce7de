/*!
 * Playground Configuration
 *
 * Runtime configuration for the demonstration binary, loaded from the
 * environment.
 *
 * Environment variables:
 * - PLAYGROUND_CONTEXTS: execution contexts in the worker pool (default: 1)
 * - PLAYGROUND_RACE_YIELD: yield policy for the counter demos (default: always)
 * - PLAYGROUND_PRIME_YIELD: yield policy for the prime workers (default: every:1024)
 * - PLAYGROUND_REPORT_JSON: also print each report as a JSON line (default: false)
 */

use crate::core::errors::{DemoError, DemoResult};
use crate::demos::{AlphabetSpec, CounterSpec, PrimeSpec};
use crate::scheduler::{PoolConfig, YieldPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    pub pool: PoolConfig,
    pub alphabet: AlphabetSpec,
    pub primes: PrimeSpec,
    pub counter: CounterSpec,
    pub report_json: bool,
}

impl PlaygroundConfig {
    pub fn from_env() -> DemoResult<Self> {
        let mut config = Self {
            pool: PoolConfig::from_env()?,
            ..Self::default()
        };

        if let Some(policy) = policy_from_env("PLAYGROUND_RACE_YIELD")? {
            config.counter.policy = policy;
        }
        if let Some(policy) = policy_from_env("PLAYGROUND_PRIME_YIELD")? {
            config.primes.policy = policy;
        }

        config.report_json = std::env::var("PLAYGROUND_REPORT_JSON")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        Ok(config)
    }
}

fn policy_from_env(key: &str) -> DemoResult<Option<YieldPolicy>> {
    match std::env::var(key) {
        Ok(raw) => YieldPolicy::from_str(&raw)
            .map(Some)
            .map_err(|e| DemoError::InvalidConfig(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
