// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Staging and committing.

use crate::error::{CmgError, GitError, Result, ResultExt};
use std::path::{Path, PathBuf};

use super::repo::Repository;

fn command_failed(command: impl Into<String>, err: git2::Error) -> CmgError {
    CmgError::Git(GitError::CommandFailed {
        command: command.into(),
        message: err.message().to_string(),
    })
}

/// Stage specific files in a given repository.
///
/// Relative paths are resolved against the process working directory.
/// Tracked files that no longer exist on disk are staged as removals; a
/// path that is neither on disk nor in the index is an error.
pub fn stage_files_in_repo(repo: &Repository, paths: &[&Path]) -> Result<()> {
    let mut index = repo.inner().index().map_err(|e| command_failed("index", e))?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;

    for path in paths {
        let command = format!("add {}", path.display());
        let relative_path = workdir_relative(repo.workdir(), &current_dir.join(path))
            .ok_or_else(|| pathspec_error(&command, "is outside the repository"))?;

        if repo.workdir().join(&relative_path).exists() {
            index
                .add_path(&relative_path)
                .map_err(|e| command_failed(command.as_str(), e))?;
        } else if index.get_path(&relative_path, 0).is_some() {
            index
                .remove_path(&relative_path)
                .map_err(|e| command_failed(command.as_str(), e))?;
        } else {
            return Err(pathspec_error(&command, "did not match any files"));
        }
    }

    index.write().map_err(|e| command_failed("write index", e))?;

    Ok(())
}

fn pathspec_error(command: &str, message: &str) -> CmgError {
    CmgError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: format!("pathspec {}", message),
    })
}

/// Path of `absolute` inside `workdir`, following symlinked prefixes.
fn workdir_relative(workdir: &Path, absolute: &Path) -> Option<PathBuf> {
    if let Ok(relative) = absolute.strip_prefix(workdir) {
        return Some(relative.to_path_buf());
    }

    let workdir = workdir.canonicalize().ok()?;
    let absolute = absolute.canonicalize().ok().or_else(|| {
        let parent = absolute.parent()?.canonicalize().ok()?;
        Some(parent.join(absolute.file_name()?))
    })?;
    absolute.strip_prefix(&workdir).ok().map(Path::to_path_buf)
}

/// Create a commit from the index and return its SHA.
pub fn create_commit_in_repo(repo: &Repository, message: &str) -> Result<String> {
    if !repo.has_staged_changes()? {
        return Err(CmgError::Git(GitError::NoStagedChanges));
    }

    let commit_failed = |context: &str, e: git2::Error| {
        CmgError::Git(GitError::CommitFailed {
            message: format!("{}: {}", context, e.message()),
        })
    };

    let sig = repo
        .inner()
        .signature()
        .map_err(|e| commit_failed("Failed to get signature", e))?;

    let mut index = repo
        .inner()
        .index()
        .map_err(|e| commit_failed("Failed to get index", e))?;
    let tree_id = index
        .write_tree()
        .map_err(|e| commit_failed("Failed to write tree", e))?;
    let tree = repo
        .inner()
        .find_tree(tree_id)
        .map_err(|e| commit_failed("Failed to find tree", e))?;

    // No parent for the initial commit.
    let parents: Vec<git2::Commit<'_>> = repo.head_commit().into_iter().collect();
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    let commit_oid = repo
        .inner()
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .map_err(|e| commit_failed("Failed to commit", e))?;

    tracing::debug!("Created commit {}", commit_oid);
    Ok(commit_oid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::repo::test_support::{init_repo, write};

    #[test]
    fn test_stage_files() {
        let dir = init_repo();
        write(dir.path(), "test.txt", "hello");
        let repo = Repository::open(dir.path()).unwrap();

        let absolute = dir.path().join("test.txt");
        stage_files_in_repo(&repo, &[absolute.as_path()]).unwrap();

        assert!(repo.has_staged_changes().unwrap());
    }

    #[test]
    fn test_commit_and_stage_removal() {
        let dir = init_repo();
        write(dir.path(), "a.txt", "one\n");
        let repo = Repository::open(dir.path()).unwrap();
        let file = dir.path().join("a.txt");
        stage_files_in_repo(&repo, &[file.as_path()]).unwrap();

        let sha = create_commit_in_repo(&repo, "chore: add a").unwrap();
        assert_eq!(sha.len(), 40);
        assert!(!repo.has_staged_changes().unwrap());
        assert_eq!(
            repo.head_commit().unwrap().message(),
            Some("chore: add a")
        );

        std::fs::remove_file(&file).unwrap();
        stage_files_in_repo(&repo, &[file.as_path()]).unwrap();
        assert!(repo.has_staged_changes().unwrap());
    }

    #[test]
    fn test_stage_unknown_path_fails() {
        let dir = init_repo();
        write(dir.path(), "real.txt", "hello");
        let repo = Repository::open(dir.path()).unwrap();

        let typo = dir.path().join("typo.txt");
        let result = stage_files_in_repo(&repo, &[typo.as_path()]);

        assert!(matches!(
            result,
            Err(CmgError::Git(GitError::CommandFailed { ref message, .. }))
                if message.contains("did not match any files")
        ));
        assert!(!repo.has_staged_changes().unwrap());
    }

    #[test]
    fn test_stage_path_outside_repository_fails() {
        let dir = init_repo();
        let other = tempfile::TempDir::new().unwrap();
        write(other.path(), "elsewhere.txt", "hello");
        let repo = Repository::open(dir.path()).unwrap();

        let outside = other.path().join("elsewhere.txt");
        assert!(stage_files_in_repo(&repo, &[outside.as_path()]).is_err());
    }

    #[test]
    fn test_workdir_relative_from_subdirectory() {
        let dir = init_repo();
        write(dir.path(), "docs/intro.md", "# Intro\n");
        let repo = Repository::open(dir.path()).unwrap();

        let from_docs = dir.path().join("docs").join("intro.md");
        assert_eq!(
            workdir_relative(repo.workdir(), &from_docs),
            Some(PathBuf::from("docs/intro.md"))
        );
    }

    #[test]
    fn test_commit_without_changes() {
        let dir = init_repo();
        let repo = Repository::open(dir.path()).unwrap();
        assert!(matches!(
            create_commit_in_repo(&repo, "chore: nothing"),
            Err(CmgError::Git(GitError::NoStagedChanges))
        ));
    }
}
