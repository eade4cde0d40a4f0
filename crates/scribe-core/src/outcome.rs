//! Terminal outcome value returned by agent operations.

use serde::{Deserialize, Serialize};

/// Result of one top-level agent operation.
///
/// Expected failure modes (an empty plan, nothing written, a failed
/// commit) are reported as values through `success` and `message` so the
/// caller can render them directly. Unexpected capability failures
/// propagate as errors instead. An outcome is never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
}

impl RunOutcome {
    /// Build a successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Build a failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
