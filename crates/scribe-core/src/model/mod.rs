//! The `Invoker` trait -- the model invocation capability.
//!
//! The pipeline never talks to a model backend directly; it is handed one
//! text-to-text operation. Concrete invokers (the Ollama client, a
//! composed strategy, a scripted fake in tests) implement this trait. The
//! trait is intentionally object-safe so it can be stored as
//! `Box<dyn Invoker>` on the agent.

pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;

pub use ollama::{ModelError, OllamaClient};

/// One blocking text completion.
///
/// No retries and no timeout exist at the pipeline layer; both are the
/// invoker's own concern, and a slow or failing invoker propagates
/// directly to the caller.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Human-readable name for this invoker (e.g. "ollama").
    fn name(&self) -> &str;

    /// Send `prompt` to the model and return its raw text response.
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

// Compile-time assertion: Invoker must be object-safe.
// If this line compiles, the trait can be used as `dyn Invoker`.
const _: () = {
    fn _assert_object_safe(_: &dyn Invoker) {}
};
