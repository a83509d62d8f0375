// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Path and content predicates shared by the extractors.
//!
//! All matching is case-sensitive substring or suffix matching on the
//! forward-slash paths found in diff headers.

use super::diff::ChangeRecord;

pub(crate) const STYLESHEET_EXTENSIONS: &[&str] = &[".css", ".scss"];
pub(crate) const TEST_FILE_SUFFIXES: &[&str] = &[".test.ts", ".spec.ts"];
pub(crate) const DOC_EXTENSION: &str = ".md";
pub(crate) const MANIFEST_FILES: &[&str] = &["package.json", "package-lock.json"];

/// Directory or name markers for test files used by the "only tests" checks.
pub(crate) const TEST_MARKERS: &[&str] = &["/tests/", ".test.", ".spec."];

/// Markers for routing code.
pub(crate) const ROUTE_PATH_MARKERS: &[&str] = &["/routes/", "Router"];
pub(crate) const ROUTER_USAGE: &str = "router.";

pub(crate) fn contains_any(path: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| path.contains(n))
}

pub(crate) fn ends_with_any(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| path.ends_with(s))
}

/// True when at least one path satisfies `pred`.
pub(crate) fn any_path(records: &[ChangeRecord], pred: impl Fn(&str) -> bool) -> bool {
    records.iter().any(|r| pred(&r.path))
}

/// True when there is at least one path and all of them satisfy `pred`.
pub(crate) fn every_path(records: &[ChangeRecord], pred: impl Fn(&str) -> bool) -> bool {
    !records.is_empty() && records.iter().all(|r| pred(&r.path))
}

/// Documentation file: under `/docs/` or a Markdown file.
pub(crate) fn is_doc_file(path: &str) -> bool {
    path.contains("/docs/") || path.ends_with(DOC_EXTENSION)
}

/// Test file by directory or naming convention.
pub(crate) fn is_test_file(path: &str) -> bool {
    contains_any(path, TEST_MARKERS)
}

/// All added, removed and context lines, space-joined.
pub(crate) fn combined_text(records: &[ChangeRecord]) -> String {
    records
        .iter()
        .flat_map(|r| {
            r.added_lines
                .iter()
                .chain(r.removed_lines.iter())
                .chain(r.context_lines.iter())
        })
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final path segment.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its final extension.
pub(crate) fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
