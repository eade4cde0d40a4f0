//! The two-stage generation pipeline: plan, gate, draft, parse, write.

pub mod parser;
pub mod runner;
pub mod writer;

pub use parser::{parse_artifacts, strip_code_fences};
pub use runner::{PipelineRequest, StageOutput, StageVariants, run_pipeline};
pub use writer::write_artifacts;

/// A (path, code) pair destined for a file write.
///
/// Produced only by the parser, consumed only by the writer. Ordering is
/// significant: artifacts are written in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the repository root.
    pub path: String,
    /// File contents, trimmed at both ends.
    pub code: String,
}
