// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Scope inference from changed paths.

use super::diff::ChangeRecord;
use super::patterns::{
    any_path, contains_any, ends_with_any, every_path, DOC_EXTENSION, STYLESHEET_EXTENSIONS,
    TEST_FILE_SUFFIXES,
};

/// A scope and the condition under which it applies.
pub struct ScopeRule {
    /// Short name, used in logs and tests.
    pub name: &'static str,
    /// Scope produced when the rule matches.
    pub scope: &'static str,
    matches: fn(&[ChangeRecord]) -> bool,
}

impl ScopeRule {
    /// Check the rule against a change set.
    pub fn matches(&self, records: &[ChangeRecord]) -> bool {
        (self.matches)(records)
    }
}

/// Scope rules in priority order. The first match wins.
pub const SCOPE_RULES: &[ScopeRule] = &[
    ScopeRule {
        name: "api-dir",
        scope: "api",
        matches: |r| any_path(r, |p| contains_any(p, &["/api/", "/routes/"])),
    },
    ScopeRule {
        name: "ui-dir",
        scope: "ui",
        matches: |r| any_path(r, |p| contains_any(p, &["/ui/", "/components/"])),
    },
    ScopeRule {
        name: "db-dir",
        scope: "db",
        matches: |r| any_path(r, |p| contains_any(p, &["/db/", "/models/"])),
    },
    ScopeRule {
        name: "auth-dir",
        scope: "auth",
        matches: |r| any_path(r, |p| contains_any(p, &["/auth/", "security"])),
    },
    ScopeRule {
        name: "test-dir",
        scope: "tests",
        matches: |r| any_path(r, |p| p.contains("/test/")),
    },
    ScopeRule {
        name: "docs-dir",
        scope: "docs",
        matches: |r| any_path(r, |p| p.contains("/docs/")),
    },
    ScopeRule {
        name: "only-stylesheets",
        scope: "styles",
        matches: |r| every_path(r, |p| ends_with_any(p, STYLESHEET_EXTENSIONS)),
    },
    ScopeRule {
        name: "only-test-files",
        scope: "tests",
        matches: |r| every_path(r, |p| ends_with_any(p, TEST_FILE_SUFFIXES)),
    },
    ScopeRule {
        name: "only-markdown",
        scope: "docs",
        matches: |r| every_path(r, |p| p.ends_with(DOC_EXTENSION)),
    },
];

/// Infer a scope for the change set, if any rule matches.
pub fn infer_scope(records: &[ChangeRecord]) -> Option<&'static str> {
    let rule = SCOPE_RULES.iter().find(|rule| rule.matches(records))?;
    tracing::debug!("Scope rule '{}' matched -> {}", rule.name, rule.scope);
    Some(rule.scope)
}
