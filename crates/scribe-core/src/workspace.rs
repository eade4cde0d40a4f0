//! Repository-rooted file persistence.
//!
//! Generated artifacts carry relative paths chosen by a model, so the
//! writer treats them as untrusted: everything must resolve under the
//! configured repository root, and parent directories are created on
//! demand.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors from persisting one artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The artifact path is absolute or climbs out of the repository root.
    #[error("path escapes the repository root: {0:?}")]
    PathEscapes(String),

    /// Creating a parent directory failed.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file write itself failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Capability for persisting one generated file at a relative path.
pub trait FileWriter: Send + Sync {
    fn write(&self, relative_path: &str, content: &str) -> Result<(), WriteError>;
}

/// [`FileWriter`] backed by the local filesystem under a repository root.
#[derive(Debug, Clone)]
pub struct RepoWorkspace {
    root: PathBuf,
}

impl RepoWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative_path` under the root, rejecting absolute paths
    /// and any `..` component.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf, WriteError> {
        let rel = Path::new(relative_path);
        if relative_path.is_empty() || rel.is_absolute() {
            return Err(WriteError::PathEscapes(relative_path.to_string()));
        }
        for component in rel.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(WriteError::PathEscapes(relative_path.to_string())),
            }
        }
        Ok(self.root.join(rel))
    }
}

impl FileWriter for RepoWorkspace {
    fn write(&self, relative_path: &str, content: &str) -> Result<(), WriteError> {
        let full = self.resolve(relative_path)?;
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&full, content).map_err(|source| WriteError::Io {
            path: full.clone(),
            source,
        })?;
        Ok(())
    }
}
