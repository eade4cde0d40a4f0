//! Version-control capability: commit and push through the `git` binary.
//!
//! Commands run in the repository directory with captured output, and a
//! non-zero exit becomes a typed error carrying the exit code and stderr.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::outcome::RunOutcome;

/// Errors from running a git command.
#[derive(Debug, Error)]
pub enum GitError {
    /// The command could not be spawned at all.
    #[error("failed to run git {command}: {source}")]
    GitCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero.
    #[error("git {command} failed (exit {code}): {output}")]
    GitExit {
        command: String,
        code: i32,
        output: String,
    },
}

/// Capability for recording and publishing generated files.
pub trait Vcs: Send + Sync {
    /// Stage all changes and create a commit. Returns the command output.
    fn commit(&self, message: &str) -> Result<String, GitError>;

    /// Push the current branch. Returns the command output.
    fn push(&self) -> Result<String, GitError>;
}

/// [`Vcs`] backed by the `git` binary, run in the repository directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|source| GitError::GitCommand {
                command: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            // git writes some failures (e.g. "nothing to commit") to
            // stdout, so keep both streams in the error.
            let mut combined = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if !stderr.is_empty() {
                if !combined.is_empty() {
                    combined.push('\n');
                }
                combined.push_str(&stderr);
            }
            return Err(GitError::GitExit {
                command: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                output: combined,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Vcs for GitCli {
    fn commit(&self, message: &str) -> Result<String, GitError> {
        self.run(&["add", "-A"])?;
        self.run(&["commit", "-m", message])
    }

    fn push(&self) -> Result<String, GitError> {
        self.run(&["push"])
    }
}

/// Run the commit-then-push sequence and fold the result into an outcome.
///
/// Push is only attempted after a successful commit, and a push failure is
/// reported distinctly so the caller can tell that the commit itself
/// landed.
pub fn commit_and_push(vcs: &dyn Vcs, message: &str, push: bool) -> RunOutcome {
    let commit_output = match vcs.commit(message) {
        Ok(output) => output,
        Err(e) => return RunOutcome::failure(e.to_string()),
    };
    tracing::info!(output = %commit_output, "commit created");

    if push {
        return match vcs.push() {
            Ok(_) => RunOutcome::success("Commit and push succeeded."),
            Err(e) => RunOutcome::failure(format!("Commit succeeded, but push failed:\n{e}")),
        };
    }
    RunOutcome::success("Commit succeeded.")
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::*;

    /// Vcs with scripted results that counts push attempts.
    struct FakeVcs {
        commit_result: Result<String, String>,
        push_result: Result<String, String>,
        push_calls: AtomicUsize,
    }

    impl FakeVcs {
        fn new(commit_result: Result<&str, &str>, push_result: Result<&str, &str>) -> Self {
            Self {
                commit_result: commit_result
                    .map(str::to_string)
                    .map_err(str::to_string),
                push_result: push_result.map(str::to_string).map_err(str::to_string),
                push_calls: AtomicUsize::new(0),
            }
        }
    }

    impl Vcs for FakeVcs {
        fn commit(&self, _message: &str) -> Result<String, GitError> {
            self.commit_result
                .clone()
                .map_err(|output| GitError::GitExit {
                    command: "commit -m".to_string(),
                    code: 1,
                    output,
                })
        }

        fn push(&self) -> Result<String, GitError> {
            self.push_calls.fetch_add(1, Ordering::SeqCst);
            self.push_result.clone().map_err(|output| GitError::GitExit {
                command: "push".to_string(),
                code: 1,
                output,
            })
        }
    }

    #[test]
    fn commit_failure_skips_push_entirely() {
        let vcs = FakeVcs::new(Err("nothing to commit"), Ok("pushed"));

        let outcome = commit_and_push(&vcs, "msg", true);

        assert!(!outcome.success);
        assert!(
            outcome.message.contains("nothing to commit"),
            "commit failure detail must survive verbatim: {}",
            outcome.message
        );
        assert_eq!(vcs.push_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn commit_without_push_succeeds() {
        let vcs = FakeVcs::new(Ok("created abc123"), Ok("pushed"));

        let outcome = commit_and_push(&vcs, "msg", false);

        assert!(outcome.success);
        assert_eq!(outcome.message, "Commit succeeded.");
        assert_eq!(vcs.push_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn commit_and_push_both_succeed() {
        let vcs = FakeVcs::new(Ok("created abc123"), Ok("pushed"));

        let outcome = commit_and_push(&vcs, "msg", true);

        assert!(outcome.success);
        assert_eq!(outcome.message, "Commit and push succeeded.");
        assert_eq!(vcs.push_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn push_failure_is_distinguished_from_commit_failure() {
        let vcs = FakeVcs::new(Ok("created abc123"), Err("no upstream configured"));

        let outcome = commit_and_push(&vcs, "msg", true);

        assert!(!outcome.success);
        assert!(
            outcome
                .message
                .starts_with("Commit succeeded, but push failed:\n"),
            "got: {}",
            outcome.message
        );
        assert!(outcome.message.contains("no upstream configured"));
    }

    // -- GitCli against a real repository --

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(status.status.success(), "git {args:?} failed");
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "--initial-branch=main"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "user.name", "Test"]);
    }

    #[test]
    fn git_cli_commits_staged_and_untracked_files() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        std::fs::write(tmp.path().join("hello.py"), "print('hi')\n").unwrap();

        let vcs = GitCli::new(tmp.path());
        let output = vcs.commit("add hello").unwrap();

        assert!(output.contains("add hello"), "got: {output}");
    }

    #[test]
    fn git_cli_commit_with_no_changes_fails() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        std::fs::write(tmp.path().join("hello.py"), "print('hi')\n").unwrap();

        let vcs = GitCli::new(tmp.path());
        vcs.commit("first").unwrap();
        let err = vcs.commit("second").unwrap_err();

        assert!(matches!(err, GitError::GitExit { .. }), "got: {err}");
    }

    #[test]
    fn git_cli_push_without_remote_fails() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());

        let vcs = GitCli::new(tmp.path());
        let err = vcs.push().unwrap_err();

        assert!(matches!(err, GitError::GitExit { .. }), "got: {err}");
    }

    #[test]
    fn missing_repo_directory_is_a_spawn_or_exit_error() {
        let vcs = GitCli::new("/nonexistent/gone");
        let err = vcs.commit("msg").unwrap_err();
        // Spawn fails with NotFound for the cwd on most platforms.
        assert!(
            matches!(err, GitError::GitCommand { .. } | GitError::GitExit { .. }),
            "got: {err}"
        );
    }
}
