// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{CmgError, GitError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CmgError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CmgError::Git(GitError::NotARepository)
            } else {
                CmgError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                CmgError::Git(GitError::OpenFailed {
                    message: "Repository has no working directory (bare repository)".to_string(),
                })
            })?
            .to_path_buf();

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get a reference to the inner git2 repository.
    pub fn inner(&self) -> &Git2Repo {
        &self.inner
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Get the HEAD commit, if the branch is born.
    pub fn head_commit(&self) -> Option<git2::Commit<'_>> {
        self.inner.head().ok()?.peel_to_commit().ok()
    }

    /// Diff between the HEAD tree (or nothing, before the first commit) and the index.
    pub fn staged_diff(&self) -> Result<git2::Diff<'_>> {
        let head_tree = self
            .inner
            .head()
            .ok()
            .and_then(|h| h.peel_to_tree().ok());

        self.inner
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .map_err(|e| {
                CmgError::Git(GitError::DiffFailed {
                    message: e.message().to_string(),
                })
            })
    }

    /// Check if there are staged changes.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let diff = self.staged_diff()?;
        Ok(diff.deltas().len() > 0)
    }
}
