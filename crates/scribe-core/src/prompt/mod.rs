//! Prompt templates: the registry of stage templates and variable
//! substitution.

pub mod registry;
mod templates;

pub use registry::{PromptError, PromptManager};
