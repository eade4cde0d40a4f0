//! scribe-core: a staged LLM code-generation pipeline.
//!
//! Turns a natural-language feature request into source files by running
//! two sequential model calls (plan, then generate), recovering discrete
//! file artifacts from the free-form draft text, and writing them under a
//! repository root. The pipeline is parameterized over three capabilities
//! -- model invocation, file writing, and version control -- so every
//! layer can be exercised without a live model or a real repository.

pub mod agent;
pub mod config;
pub mod git;
pub mod model;
pub mod outcome;
pub mod pipeline;
pub mod prompt;
pub mod workspace;

pub use agent::{Agent, DEFAULT_MODULE_PATH, GenerateRequest};
pub use config::AgentConfig;
pub use outcome::RunOutcome;
pub use pipeline::{Artifact, StageVariants};
