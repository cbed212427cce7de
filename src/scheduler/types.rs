/*!
 * Scheduler Types
 * Pool configuration and yield policies for demonstration workers
 */

use crate::core::errors::{DemoError, DemoResult};
use crate::core::limits::{DEFAULT_CONTEXTS, MAX_CONTEXTS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// When a worker gives up its execution context at a yield point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldPolicy {
    /// Never yield; interleaving is left to the runtime
    Never,
    /// Yield at every yield point
    Always,
    /// Yield once at least `n` units of work have accumulated since the last yield
    Every(usize),
}

impl YieldPolicy {
    /// Parse from string representation (`never`, `always`, `every:<n>`)
    pub fn from_str(s: &str) -> Result<Self, String> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "never" | "none" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            other => match other.strip_prefix("every:") {
                Some(n) => n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Self::Every)
                    .ok_or_else(|| format!("Invalid yield interval '{}'", n)),
                None => Err(format!(
                    "Invalid yield policy '{}'. Valid: never, always, every:<n>",
                    s
                )),
            },
        }
    }

    /// Whether a worker with `since_last` units of unyielded work should yield now
    #[inline]
    pub const fn is_due(&self, since_last: usize) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Every(n) => since_last >= *n,
        }
    }
}

impl Default for YieldPolicy {
    fn default() -> Self {
        Self::Never
    }
}

impl std::fmt::Display for YieldPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::Always => f.write_str("always"),
            Self::Every(n) => write!(f, "every:{}", n),
        }
    }
}

impl Serialize for YieldPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YieldPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-worker yield bookkeeping
///
/// Workers call `advance` with the work done since the previous call and
/// yield when it returns `true`.
#[derive(Debug, Clone)]
pub struct YieldPoint {
    policy: YieldPolicy,
    since_last: usize,
    yields: usize,
}

impl YieldPoint {
    pub fn new(policy: YieldPolicy) -> Self {
        Self {
            policy,
            since_last: 0,
            yields: 0,
        }
    }

    /// Record `work` units and report whether the worker should yield now
    #[inline]
    pub fn advance(&mut self, work: usize) -> bool {
        self.since_last += work;
        let due = self.policy.is_due(self.since_last);
        if due {
            self.since_last = 0;
            self.yields += 1;
        }
        due
    }

    /// Yields taken so far
    pub fn yields(&self) -> usize {
        self.yields
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Execution contexts available to workers (bounds true parallelism)
    pub contexts: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            contexts: DEFAULT_CONTEXTS,
        }
    }
}

impl PoolConfig {
    /// A single execution context: workers interleave only at yield points
    pub const fn single() -> Self {
        Self { contexts: 1 }
    }

    pub const fn with_contexts(contexts: usize) -> Self {
        Self { contexts }
    }

    /// Load from `PLAYGROUND_CONTEXTS`, falling back to the default
    pub fn from_env() -> DemoResult<Self> {
        let config = match std::env::var("PLAYGROUND_CONTEXTS") {
            Ok(raw) => {
                let contexts = raw.trim().parse::<usize>().map_err(|e| {
                    DemoError::InvalidConfig(format!("PLAYGROUND_CONTEXTS='{}': {}", raw, e))
                })?;
                Self { contexts }
            }
            Err(_) => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DemoResult<()> {
        if self.contexts == 0 || self.contexts > MAX_CONTEXTS {
            return Err(DemoError::InvalidConfig(format!(
                "contexts must be between 1 and {}, got {}",
                MAX_CONTEXTS, self.contexts
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_policy_parse() {
        assert_eq!(YieldPolicy::from_str("never"), Ok(YieldPolicy::Never));
        assert_eq!(YieldPolicy::from_str("Always"), Ok(YieldPolicy::Always));
        assert_eq!(YieldPolicy::from_str("every:16"), Ok(YieldPolicy::Every(16)));
        assert!(YieldPolicy::from_str("every:0").is_err());
        assert!(YieldPolicy::from_str("sometimes").is_err());
    }

    #[test]
    fn test_yield_policy_serde() {
        let json = serde_json::to_string(&YieldPolicy::Every(8)).unwrap();
        assert_eq!(json, "\"every:8\"");
        let back: YieldPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, YieldPolicy::Every(8));
    }

    #[test]
    fn test_yield_point_every() {
        let mut point = YieldPoint::new(YieldPolicy::Every(10));
        assert!(!point.advance(4));
        assert!(!point.advance(5));
        assert!(point.advance(1));
        assert!(!point.advance(9));
        assert!(point.advance(25));
        assert_eq!(point.yields(), 2);
    }

    #[test]
    fn test_yield_point_always_and_never() {
        let mut always = YieldPoint::new(YieldPolicy::Always);
        let mut never = YieldPoint::new(YieldPolicy::Never);
        for _ in 0..3 {
            assert!(always.advance(1));
            assert!(!never.advance(1_000));
        }
        assert_eq!(always.yields(), 3);
        assert_eq!(never.yields(), 0);
    }

    #[test]
    fn test_pool_config_validate() {
        assert!(PoolConfig::single().validate().is_ok());
        assert!(PoolConfig::with_contexts(4).validate().is_ok());
        assert!(PoolConfig::with_contexts(0).validate().is_err());
        assert!(PoolConfig::with_contexts(MAX_CONTEXTS + 1).validate().is_err());
    }
}
