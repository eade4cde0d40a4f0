//! Write orchestration: turn parsed artifacts into files and an outcome.
//!
//! Artifacts are written in emission order through the injected
//! [`FileWriter`] capability. Failures are isolated per artifact: a write
//! that fails is recorded and the batch continues, so one bad path cannot
//! sink the rest of the draft. Nothing is rolled back.

use crate::outcome::RunOutcome;
use crate::workspace::FileWriter;

use super::Artifact;

/// Write every non-empty artifact and fold the results into an outcome.
///
/// Artifacts whose code trims to nothing are skipped with a warning and
/// never attempted. Zero successful writes is a failure outcome; any
/// per-artifact write failures are aggregated into the message either way.
pub fn write_artifacts(writer: &dyn FileWriter, artifacts: &[Artifact]) -> RunOutcome {
    let mut written: Vec<&str> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for artifact in artifacts {
        if artifact.code.trim().is_empty() {
            tracing::warn!(path = %artifact.path, "skipping artifact with empty code");
            continue;
        }
        match writer.write(&artifact.path, &artifact.code) {
            Ok(()) => {
                tracing::info!(path = %artifact.path, bytes = artifact.code.len(), "wrote file");
                written.push(artifact.path.as_str());
            }
            Err(e) => {
                tracing::error!(path = %artifact.path, error = %e, "write failed, continuing");
                failed.push(format!("{}: {e}", artifact.path));
            }
        }
    }

    let failure_note = if failed.is_empty() {
        String::new()
    } else {
        format!("\nFailed to write:\n{}", failed.join("\n"))
    };

    if written.is_empty() {
        return RunOutcome::failure(format!("No valid files were generated.{failure_note}"));
    }
    RunOutcome::success(format!("Wrote files:\n{}{failure_note}", written.join("\n")))
}
