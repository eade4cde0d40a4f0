//! Staged pipeline drive: plan, gate, generate, parse.
//!
//! Runs the two model stages strictly in sequence. The only hard gate sits
//! between them: an empty plan stops the run before any code-generation
//! tokens are spent. Retries and timeouts live in the invoker, not here.

use anyhow::{Context, Result};

use crate::model::Invoker;
use crate::prompt::PromptManager;

use super::{Artifact, parse_artifacts};

/// Prompt variant selection for one pipeline run.
///
/// Carried on the request rather than on the agent, so two runs can never
/// observe each other's stage selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageVariants {
    /// Variant of the `planning` task.
    pub planning: String,
    /// Variant of the `code_generation` task.
    pub code_generation: String,
}

impl Default for StageVariants {
    fn default() -> Self {
        Self {
            planning: "default".to_string(),
            code_generation: "default".to_string(),
        }
    }
}

/// Everything one pipeline run needs, borrowed from the caller.
#[derive(Debug)]
pub struct PipelineRequest<'a> {
    /// Free-text description of the program to build.
    pub description: &'a str,
    /// Default artifact path for single-file drafts.
    pub module_path: &'a str,
    /// Stage variant selection.
    pub variants: &'a StageVariants,
}

/// Output of the staged run, before any file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
    /// Stage 1 produced nothing usable; stage 2 was never invoked.
    EmptyPlan,
    /// Both stages completed and the draft parsed into ordered artifacts.
    Drafted {
        plan: String,
        artifacts: Vec<Artifact>,
    },
}

/// Run the two-stage sequence against `invoker`.
///
/// Template lookup failures and invoker failures propagate as errors; the
/// empty-plan gate is an expected outcome and comes back as
/// [`StageOutput::EmptyPlan`].
pub async fn run_pipeline(
    invoker: &dyn Invoker,
    prompts: &PromptManager,
    request: &PipelineRequest<'_>,
) -> Result<StageOutput> {
    // Stage 1: planning.
    let planning_prompt = prompts.get_prompt(
        "planning",
        &request.variants.planning,
        &[
            ("description", request.description),
            ("module_path", request.module_path),
        ],
    )?;
    tracing::debug!(stage = "planning", prompt = %planning_prompt, "assembled prompt");

    let plan = invoker
        .invoke(&planning_prompt)
        .await
        .context("planning invocation failed")?;
    let plan = plan.trim().to_string();

    // Hard gate: with no plan, stage 2 would generate from nothing.
    if plan.is_empty() {
        tracing::warn!(invoker = invoker.name(), "model returned an empty plan");
        return Ok(StageOutput::EmptyPlan);
    }
    tracing::debug!(stage = "planning", plan = %plan, "stage complete");

    // Stage 2: code generation, fed the stage-1 plan.
    let generation_prompt = prompts.get_prompt(
        "code_generation",
        &request.variants.code_generation,
        &[
            ("description", request.description),
            ("module_path", request.module_path),
            ("plan", &plan),
        ],
    )?;
    tracing::debug!(stage = "code_generation", prompt = %generation_prompt, "assembled prompt");

    let draft = invoker
        .invoke(&generation_prompt)
        .await
        .context("code generation invocation failed")?;
    tracing::debug!(stage = "code_generation", draft_bytes = draft.len(), "stage complete");

    let artifacts = parse_artifacts(&draft, request.module_path);
    tracing::debug!(count = artifacts.len(), "parsed artifacts from draft");

    Ok(StageOutput::Drafted { plan, artifacts })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::*;

    /// Invoker that replays scripted responses and records every prompt.
    struct ScriptedInvoker {
        responses: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedInvoker {
        fn new(responses: &[&str]) -> Self {
            // Stored reversed so pop() replays in script order.
            let mut responses: Vec<String> =
                responses.iter().map(|s| s.to_string()).collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, index: usize) -> String {
            self.prompts.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl Invoker for ScriptedInvoker {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn invoke(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| anyhow!("script exhausted"))
        }
    }

    fn request<'a>(variants: &'a StageVariants) -> PipelineRequest<'a> {
        PipelineRequest {
            description: "a greeter module",
            module_path: "src/main.py",
            variants,
        }
    }

    #[tokio::test]
    async fn happy_path_runs_both_stages() {
        let invoker = ScriptedInvoker::new(&[
            "1. write src/hello.py",
            "File: src/hello.py\nprint('hi')\n",
        ]);
        let prompts = PromptManager::new();
        let variants = StageVariants::default();

        let output = run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap();

        assert_eq!(invoker.call_count(), 2);
        let StageOutput::Drafted { plan, artifacts } = output else {
            panic!("expected Drafted, got {output:?}");
        };
        assert_eq!(plan, "1. write src/hello.py");
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, "src/hello.py");
    }

    #[tokio::test]
    async fn empty_plan_gates_before_stage_two() {
        let invoker = ScriptedInvoker::new(&["   \n\t  "]);
        let prompts = PromptManager::new();
        let variants = StageVariants::default();

        let output = run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap();

        assert_eq!(output, StageOutput::EmptyPlan);
        assert_eq!(invoker.call_count(), 1, "stage 2 must never be invoked");
    }

    #[tokio::test]
    async fn stage_two_prompt_carries_the_plan() {
        let invoker = ScriptedInvoker::new(&[
            "PLAN-MARKER: build the greeter",
            "File: src/hello.py\nprint('hi')\n",
        ]);
        let prompts = PromptManager::new();
        let variants = StageVariants::default();

        run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap();

        let generation_prompt = invoker.prompt(1);
        assert!(generation_prompt.contains("PLAN-MARKER: build the greeter"));
        assert!(generation_prompt.contains("a greeter module"));
    }

    #[tokio::test]
    async fn unknown_variant_propagates_template_not_found() {
        let invoker = ScriptedInvoker::new(&[]);
        let prompts = PromptManager::new();
        let variants = StageVariants {
            planning: "nonexistent".to_string(),
            code_generation: "default".to_string(),
        };

        let err = run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nonexistent"), "got: {err:#}");
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn invoker_failure_propagates() {
        // Script exhausted on the first call.
        let invoker = ScriptedInvoker::new(&[]);
        let prompts = PromptManager::new();
        let variants = StageVariants::default();

        let err = run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap_err();
        assert!(
            err.to_string().contains("planning invocation failed"),
            "got: {err:#}"
        );
    }

    #[tokio::test]
    async fn whole_plan_is_trimmed() {
        let invoker = ScriptedInvoker::new(&[
            "\n  1. do the thing  \n\n",
            "File: a.py\nx = 1\n",
        ]);
        let prompts = PromptManager::new();
        let variants = StageVariants::default();

        let output = run_pipeline(&invoker, &prompts, &request(&variants))
            .await
            .unwrap();
        let StageOutput::Drafted { plan, .. } = output else {
            panic!("expected Drafted");
        };
        assert_eq!(plan, "1. do the thing");
    }
}
