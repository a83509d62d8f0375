// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit type inference.

use crate::config::CommitType;

use super::diff::{ChangeRecord, LineStats};
use super::patterns::{
    any_path, combined_text, contains_any, ends_with_any, every_path, is_doc_file, is_test_file,
    DOC_EXTENSION, MANIFEST_FILES, ROUTER_USAGE, ROUTE_PATH_MARKERS, STYLESHEET_EXTENSIONS,
    TEST_FILE_SUFFIXES,
};

/// Inputs shared by every type rule, computed once per change set.
pub struct TypeSignals<'a> {
    /// The parsed records.
    pub records: &'a [ChangeRecord],
    /// Combined line text, as written.
    pub text: String,
    /// Combined line text, lower-cased for keyword checks.
    pub text_lower: String,
    /// Line counts.
    pub stats: LineStats,
}

impl<'a> TypeSignals<'a> {
    /// Compute the signals for a change set.
    pub fn new(records: &'a [ChangeRecord]) -> Self {
        let text = combined_text(records);
        let text_lower = text.to_lowercase();
        Self {
            records,
            text,
            text_lower,
            stats: LineStats::of(records),
        }
    }

    fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.text_lower.contains(k))
    }
}

/// A commit type and the condition under which it applies.
pub struct TypeRule {
    /// Short name, used in logs and tests.
    pub name: &'static str,
    /// Type produced when the rule matches.
    pub commit_type: CommitType,
    matches: fn(&TypeSignals<'_>) -> bool,
}

impl TypeRule {
    /// Check the rule against precomputed signals.
    pub fn matches(&self, signals: &TypeSignals<'_>) -> bool {
        (self.matches)(signals)
    }
}

/// Type rules in priority order. The first match wins; `chore` is the fallback.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "test-path",
        commit_type: CommitType::Test,
        matches: |s| {
            any_path(s.records, |p| {
                p.contains("/test/") || ends_with_any(p, TEST_FILE_SUFFIXES)
            })
        },
    },
    TypeRule {
        name: "docs-path",
        commit_type: CommitType::Docs,
        matches: |s| any_path(s.records, |p| p.ends_with(DOC_EXTENSION) || p.contains("README")),
    },
    TypeRule {
        name: "stylesheet",
        commit_type: CommitType::Style,
        matches: |s| any_path(s.records, |p| ends_with_any(p, STYLESHEET_EXTENSIONS)),
    },
    TypeRule {
        name: "manifest",
        commit_type: CommitType::Build,
        matches: |s| any_path(s.records, |p| contains_any(p, MANIFEST_FILES)),
    },
    TypeRule {
        name: "docs-only",
        commit_type: CommitType::Docs,
        matches: |s| every_path(s.records, is_doc_file),
    },
    TypeRule {
        name: "tests-only",
        commit_type: CommitType::Test,
        matches: |s| every_path(s.records, is_test_file),
    },
    TypeRule {
        name: "route-refactor",
        commit_type: CommitType::Refactor,
        matches: |s| {
            any_path(s.records, |p| contains_any(p, ROUTE_PATH_MARKERS))
                && s.text.contains(ROUTER_USAGE)
                && s.records.len() > 1
        },
    },
    TypeRule {
        name: "fix-keyword",
        commit_type: CommitType::Fix,
        matches: |s| s.mentions(&["fix", "bug"]),
    },
    TypeRule {
        name: "refactor-keyword",
        commit_type: CommitType::Refactor,
        matches: |s| s.mentions(&["refactor", "cleanup"]),
    },
    TypeRule {
        name: "perf-keyword",
        commit_type: CommitType::Perf,
        matches: |s| s.mentions(&["perf", "performance"]),
    },
    TypeRule {
        name: "mostly-added",
        commit_type: CommitType::Feat,
        matches: |s| s.stats.added > s.stats.removed * 2,
    },
    TypeRule {
        name: "mostly-removed",
        commit_type: CommitType::Refactor,
        matches: |s| s.stats.removed > s.stats.added * 2,
    },
    TypeRule {
        name: "any-change",
        commit_type: CommitType::Fix,
        matches: |s| s.stats.total_lines_changed() > 0,
    },
];

/// Infer the commit type for the change set.
pub fn infer_type(records: &[ChangeRecord]) -> CommitType {
    let signals = TypeSignals::new(records);

    match TYPE_RULES.iter().find(|rule| rule.matches(&signals)) {
        Some(rule) => {
            tracing::debug!("Type rule '{}' matched -> {}", rule.name, rule.commit_type);
            rule.commit_type
        }
        None => CommitType::Chore,
    }
}
