//! Template registry and prompt assembly.
//!
//! Templates are keyed by (task, variant). Assembly substitutes named
//! `{placeholder}` variables into the template text. A missing (task,
//! variant) pair is a hard error -- the pipeline must report it rather
//! than silently fall back to some other template.

use std::collections::HashMap;

use thiserror::Error;

use super::templates;

/// Errors from prompt lookup.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("no prompt template registered for task {task:?} variant {variant:?}")]
    TemplateNotFound { task: String, variant: String },
}

/// Registry of stage templates, keyed by (task, variant).
///
/// Ships with built-in `default` and `detailed` variants for the
/// `planning` and `code_generation` tasks; callers can register their own
/// on top.
pub struct PromptManager {
    templates: HashMap<(String, String), String>,
}

impl PromptManager {
    /// Registry pre-loaded with the built-in templates.
    pub fn new() -> Self {
        let mut manager = Self {
            templates: HashMap::new(),
        };
        manager.register("planning", "default", templates::PLANNING_DEFAULT);
        manager.register("planning", "detailed", templates::PLANNING_DETAILED);
        manager.register(
            "code_generation",
            "default",
            templates::CODE_GENERATION_DEFAULT,
        );
        manager.register(
            "code_generation",
            "detailed",
            templates::CODE_GENERATION_DETAILED,
        );
        manager
    }

    /// Register a template under (task, variant).
    ///
    /// If the pair is already registered, the template is replaced and the
    /// old text is returned.
    pub fn register(&mut self, task: &str, variant: &str, template: &str) -> Option<String> {
        self.templates
            .insert((task.to_string(), variant.to_string()), template.to_string())
    }

    /// Assemble the prompt for (task, variant), substituting `vars`.
    ///
    /// Each `(name, value)` pair replaces every `{name}` occurrence in the
    /// template. Placeholders with no matching pair are left in place.
    /// Side-effect-free.
    pub fn get_prompt(
        &self,
        task: &str,
        variant: &str,
        vars: &[(&str, &str)],
    ) -> Result<String, PromptError> {
        let template = self
            .templates
            .get(&(task.to_string(), variant.to_string()))
            .ok_or_else(|| PromptError::TemplateNotFound {
                task: task.to_string(),
                variant: variant.to_string(),
            })?;

        let mut prompt = template.clone();
        for (name, value) in vars {
            prompt = prompt.replace(&format!("{{{name}}}"), value);
        }
        Ok(prompt)
    }

    /// List all registered task names, sorted and de-duplicated.
    pub fn list_tasks(&self) -> Vec<String> {
        let mut tasks: Vec<String> = self
            .templates
            .keys()
            .map(|(task, _)| task.clone())
            .collect();
        tasks.sort();
        tasks.dedup();
        tasks
    }

    /// List the variants registered for `task`, sorted.
    pub fn list_variants(&self, task: &str) -> Vec<String> {
        let mut variants: Vec<String> = self
            .templates
            .keys()
            .filter(|(t, _)| t == task)
            .map(|(_, variant)| variant.clone())
            .collect();
        variants.sort();
        variants
    }
}

impl Default for PromptManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptManager")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}
