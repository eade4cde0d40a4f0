//! Agent configuration.

use std::path::PathBuf;

/// Default model host (a local Ollama daemon).
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen2.5-coder";

/// Default sampling temperature for both pipeline stages.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Immutable configuration for one [`crate::agent::Agent`].
///
/// Owned by the caller and passed in at construction; the pipeline never
/// mutates it.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Repository root that generated files are written under.
    pub repo: PathBuf,
    /// Model identifier sent to the backend.
    pub model: String,
    /// Base URL of the model host.
    pub host: String,
    /// Sampling temperature for both pipeline stages.
    pub temperature: f32,
}

impl AgentConfig {
    /// Config rooted at `repo` with default model settings.
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
