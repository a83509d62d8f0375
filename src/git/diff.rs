// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Staged changes as unified diff text.

use crate::error::{CmgError, GitError, Result};

use super::repo::Repository;

/// Get the staged changes of a repository as a unified diff.
///
/// Fails with [`GitError::NoStagedChanges`] when nothing is staged.
pub fn staged_diff_text(repo: &Repository) -> Result<String> {
    let diff = repo.staged_diff()?;
    let mut text = String::new();

    diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());
        match line.origin() {
            origin @ ('+' | '-' | ' ') => {
                text.push(origin);
                text.push_str(&content);
            }
            _ => text.push_str(&content),
        }
        true
    })
    .map_err(|e| {
        CmgError::Git(GitError::DiffFailed {
            message: e.message().to_string(),
        })
    })?;

    if text.trim().is_empty() {
        return Err(CmgError::Git(GitError::NoStagedChanges));
    }

    tracing::debug!("Staged diff is {} bytes", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_diff;
    use crate::git::repo::test_support::{init_repo, write};
    use crate::git::stage_files_in_repo;

    #[test]
    fn test_nothing_staged() {
        let dir = init_repo();
        let repo = Repository::open(dir.path()).unwrap();
        assert!(matches!(
            staged_diff_text(&repo),
            Err(CmgError::Git(GitError::NoStagedChanges))
        ));
    }

    #[test]
    fn test_staged_diff_parses() {
        let dir = init_repo();
        write(dir.path(), "docs/intro.md", "# Intro\nWelcome.\n");
        let repo = Repository::open(dir.path()).unwrap();
        let file = dir.path().join("docs/intro.md");
        stage_files_in_repo(&repo, &[file.as_path()]).unwrap();

        let text = staged_diff_text(&repo).unwrap();
        assert!(text.starts_with("diff --git a/docs/intro.md b/docs/intro.md"));

        let records = parse_diff(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "docs/intro.md");
        assert_eq!(records[0].added_lines, vec!["# Intro", "Welcome."]);
    }
}
