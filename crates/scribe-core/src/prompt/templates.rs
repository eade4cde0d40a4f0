//! Built-in stage templates.
//!
//! Each template is keyed by (task, variant) in the registry. Placeholders
//! use `{name}` syntax; the assembler substitutes `description`,
//! `module_path` and (for the code-generation stage) `plan`.

pub(super) const PLANNING_DEFAULT: &str = r#"You are a senior software engineer planning a new program.

Request:
{description}

Produce a short implementation plan for the request. List the files to
create (the entry point belongs at `{module_path}`), what each file
contains, and the order to build them in. Keep the plan under 15 lines.
Respond with the plan only -- no code yet.
"#;

pub(super) const PLANNING_DETAILED: &str = r#"You are a senior software engineer planning a new program.

Request:
{description}

Produce a thorough implementation plan:

1. List every file to create, with the entry point at `{module_path}`.
2. For each file, describe its public interface (functions, classes,
   signatures) and its responsibilities.
3. Name the edge cases each piece must handle.
4. Give the build order, noting which files depend on which.

Respond with the plan only -- no code yet.
"#;

pub(super) const CODE_GENERATION_DEFAULT: &str = r#"You are a senior software engineer implementing a plan.

Request:
{description}

Plan:
{plan}

Write the complete contents of every file in the plan. Format your answer
as repeated sections, one per file:

File: path/to/file
<file contents>
---

Use `{module_path}` for the entry point. Output only file sections -- no
commentary before, between, or after them.
"#;

pub(super) const CODE_GENERATION_DETAILED: &str = r#"You are a senior software engineer implementing a plan.

Request:
{description}

Plan:
{plan}

Write the complete contents of every file in the plan. Requirements:

- Document every public function or class.
- Handle the edge cases the plan names.
- Include a test file when the plan calls for one.

Format your answer as repeated sections, one per file:

File: path/to/file
<file contents>
---

Use `{module_path}` for the entry point. Output only file sections -- no
commentary before, between, or after them.
"#;
