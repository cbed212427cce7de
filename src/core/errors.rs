/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::guard::GuardError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Join barrier errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum BarrierError {
    #[error("Barrier '{barrier}' over-reported: more than {expected} completions")]
    #[diagnostic(
        code(barrier::over_report),
        help("A worker reported completion twice, or the barrier was sized too small.")
    )]
    OverReport { barrier: String, expected: usize },

    #[error("Barrier '{barrier}' cannot be re-armed with {remaining} completions outstanding")]
    #[diagnostic(
        code(barrier::still_armed),
        help("Wait for the current batch of workers to finish before re-arming.")
    )]
    StillArmed { barrier: String, remaining: usize },
}

/// Unified demonstration error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum DemoError {
    #[error("Barrier error: {0}")]
    #[diagnostic(transparent)]
    Barrier(#[from] BarrierError),

    #[error("Guard error: {0}")]
    Guard(#[from] GuardError),

    #[error("Worker '{worker}' terminated abnormally: {reason}")]
    #[diagnostic(
        code(demo::worker_panicked),
        help("The worker still reported to its barrier; inspect the logs for the panic message.")
    )]
    WorkerPanicked { worker: String, reason: String },

    #[error("Runtime error: {0}")]
    #[diagnostic(
        code(demo::runtime),
        help("The worker pool could not be built. Check thread limits on this host.")
    )]
    Runtime(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(demo::invalid_config),
        help("Invalid configuration. Review PLAYGROUND_* environment variables.")
    )]
    InvalidConfig(String),
}

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        DemoError::Runtime(err.to_string())
    }
}

/// Common result type for demonstration routines
pub type DemoResult<T> = Result<T, DemoError>;
