/*!
 * Core Types
 * Common types used across the demonstrations
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker ID type
pub type WorkerId = usize;

/// Identifies one worker for logs and error messages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerLabel(String);

impl WorkerLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Label for a numbered worker, e.g. `routine-1`
    pub fn numbered(prefix: &str, id: WorkerId) -> Self {
        Self(format!("{}-{}", prefix, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for WorkerLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}
