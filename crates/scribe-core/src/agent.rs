//! Agent facade: the operations a caller (the CLI) drives.
//!
//! An agent owns its configuration and three injected capabilities --
//! model invocation, file writing, and version control -- and exposes the
//! three public operations: generate a program, commit-and-push, and list
//! the prompt library. One agent handles one call at a time; callers that
//! want concurrency build one agent per call.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::config::AgentConfig;
use crate::git::{self, GitCli, Vcs};
use crate::model::{Invoker, OllamaClient};
use crate::outcome::RunOutcome;
use crate::pipeline::{
    PipelineRequest, StageOutput, StageVariants, run_pipeline, write_artifacts,
};
use crate::prompt::PromptManager;
use crate::workspace::{FileWriter, RepoWorkspace};

/// Artifact path used when the caller gives none and the draft has no
/// usable file markers.
pub const DEFAULT_MODULE_PATH: &str = "src/main.py";

/// One program-generation request.
///
/// Immutable; variant selection travels with the request rather than
/// living on the agent, so no state leaks between calls.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Free-text description of the program or module to build.
    pub description: String,
    /// Where a single-file draft should land; defaults to
    /// [`DEFAULT_MODULE_PATH`].
    pub module_path: Option<String>,
    /// Prompt variants for the two stages.
    pub variants: StageVariants,
}

impl GenerateRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            module_path: None,
            variants: StageVariants::default(),
        }
    }

    /// The effective module path for this request.
    pub fn module_path(&self) -> &str {
        self.module_path.as_deref().unwrap_or(DEFAULT_MODULE_PATH)
    }
}

/// The program-generation agent.
pub struct Agent {
    config: AgentConfig,
    prompts: PromptManager,
    invoker: Box<dyn Invoker>,
    writer: Box<dyn FileWriter>,
    vcs: Box<dyn Vcs>,
}

impl Agent {
    /// Agent wired to an Ollama backend and the local repository from
    /// `config`.
    pub fn new(config: AgentConfig) -> Result<Self> {
        let invoker = OllamaClient::new(&config.host, &config.model, config.temperature)?;
        let writer = RepoWorkspace::new(&config.repo);
        let vcs = GitCli::new(&config.repo);
        Ok(Self::with_capabilities(
            config,
            Box::new(invoker),
            Box::new(writer),
            Box::new(vcs),
        ))
    }

    /// Agent from explicit capabilities. Used by tests and by callers
    /// composing their own invocation strategy.
    pub fn with_capabilities(
        config: AgentConfig,
        invoker: Box<dyn Invoker>,
        writer: Box<dyn FileWriter>,
        vcs: Box<dyn Vcs>,
    ) -> Self {
        Self {
            config,
            prompts: PromptManager::new(),
            invoker,
            writer,
            vcs,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Generate a program from `request`: plan, gate, draft, parse, write.
    ///
    /// Expected failure modes (empty plan, nothing written) come back as
    /// failure outcomes; template lookup and invoker transport failures
    /// propagate as errors.
    pub async fn create_program(&self, request: &GenerateRequest) -> Result<RunOutcome> {
        tracing::info!(
            model = %self.config.model,
            invoker = self.invoker.name(),
            module_path = request.module_path(),
            "starting program generation"
        );

        let pipeline_request = PipelineRequest {
            description: &request.description,
            module_path: request.module_path(),
            variants: &request.variants,
        };

        let artifacts =
            match run_pipeline(self.invoker.as_ref(), &self.prompts, &pipeline_request).await? {
                StageOutput::EmptyPlan => {
                    return Ok(RunOutcome::failure("Model returned empty plan."));
                }
                StageOutput::Drafted { artifacts, .. } => artifacts,
            };

        Ok(write_artifacts(self.writer.as_ref(), &artifacts))
    }

    /// Commit staged-plus-untracked changes, then push if requested.
    pub fn commit_and_push(&self, message: &str, push: bool) -> RunOutcome {
        git::commit_and_push(self.vcs.as_ref(), message, push)
    }

    /// Map of prompt task -> available variants, sorted.
    pub fn list_available_prompts(&self) -> BTreeMap<String, Vec<String>> {
        self.prompts
            .list_tasks()
            .into_iter()
            .map(|task| {
                let variants = self.prompts.list_variants(&task);
                (task, variants)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_module_path() {
        let request = GenerateRequest::new("a thing");
        assert_eq!(request.module_path(), DEFAULT_MODULE_PATH);

        let request = GenerateRequest {
            module_path: Some("lib/custom.py".to_string()),
            ..GenerateRequest::new("a thing")
        };
        assert_eq!(request.module_path(), "lib/custom.py");
    }

    #[test]
    fn request_defaults_both_variants() {
        let request = GenerateRequest::new("a thing");
        assert_eq!(request.variants.planning, "default");
        assert_eq!(request.variants.code_generation, "default");
    }
}
