// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Classification result and conventional commit assembly.

use crate::config::CommitType;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A single-line conventional commit header.
    static ref HEADER_REGEX: Regex =
        Regex::new(r"^(?P<type>[a-z]+)(?:\((?P<scope>[^()\s]+)\))?: (?P<description>\S.*)$")
            .unwrap();
}

/// The type, scope and description inferred for a change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Commit type.
    pub commit_type: CommitType,
    /// Optional scope.
    pub scope: Option<String>,
    /// Imperative description.
    pub description: String,
}

impl Classification {
    /// Create a classification without a scope.
    pub fn new(commit_type: CommitType, description: impl Into<String>) -> Self {
        Self {
            commit_type,
            scope: None,
            description: description.into(),
        }
    }

    /// Set the scope. Empty scopes are dropped.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = if scope.is_empty() { None } else { Some(scope) };
        self
    }

    /// Format as `type(scope): description` or `type: description`.
    pub fn format(&self) -> String {
        let mut result = String::new();
        result.push_str(self.commit_type.as_str());

        if let Some(ref scope) = self.scope {
            result.push('(');
            result.push_str(scope);
            result.push(')');
        }

        result.push_str(": ");
        result.push_str(&self.description);

        result
    }

    /// Parse a header produced by [`Classification::format`].
    pub fn parse(header: &str) -> Option<Self> {
        let captures = HEADER_REGEX.captures(header.trim())?;
        let commit_type = captures.name("type")?.as_str().parse().ok()?;
        let description = captures.name("description")?.as_str().to_string();

        let classification = Self::new(commit_type, description);
        Some(match captures.name("scope") {
            Some(scope) => classification.with_scope(scope.as_str()),
            None => classification,
        })
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_scope() {
        let c = Classification::new(CommitType::Feat, "add users endpoint").with_scope("api");
        assert_eq!(c.format(), "feat(api): add users endpoint");
    }

    #[test]
    fn test_format_without_scope() {
        let c = Classification::new(CommitType::Chore, "update code");
        assert_eq!(c.format(), "chore: update code");
    }

    #[test]
    fn test_empty_scope_is_dropped() {
        let c = Classification::new(CommitType::Fix, "update code").with_scope("");
        assert!(c.scope.is_none());
        assert_eq!(c.to_string(), "fix: update code");
    }

    #[test]
    fn test_parse() {
        let c = Classification::parse("docs(docs): add intro documentation").unwrap();
        assert_eq!(c.commit_type, CommitType::Docs);
        assert_eq!(c.scope.as_deref(), Some("docs"));
        assert_eq!(c.description, "add intro documentation");

        let c = Classification::parse("chore: update code").unwrap();
        assert!(c.scope.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_or_malformed() {
        assert!(Classification::parse("wip: stuff").is_none());
        assert!(Classification::parse("feat:missing space").is_none());
        assert!(Classification::parse("just text").is_none());
    }
}
