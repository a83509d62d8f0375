// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Description synthesis.

use super::diff::ChangeRecord;
use super::patterns::{file_stem, is_doc_file, is_test_file, ROUTER_USAGE};

/// Used when no phrase applies.
pub const FALLBACK_DESCRIPTION: &str = "update code";

const ROUTE_MOVE_PHRASE: &str = "move API routes to dedicated module";

/// Build an imperative description of the change set.
///
/// Phrases for documentation, tests and route moves are collected in that
/// order and joined with " and ".
pub fn describe(records: &[ChangeRecord]) -> String {
    let phrases: Vec<String> = [docs_phrase(records), tests_phrase(records), route_phrase(records)]
        .into_iter()
        .flatten()
        .collect();

    if phrases.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        phrases.join(" and ")
    }
}

fn docs_phrase(records: &[ChangeRecord]) -> Option<String> {
    if !records.iter().any(|r| is_doc_file(&r.path)) {
        return None;
    }
    let stems = stems(records, is_doc_file, file_stem);
    Some(format!("add {} documentation", stems.join(", ")))
}

fn tests_phrase(records: &[ChangeRecord]) -> Option<String> {
    if !records.iter().any(|r| is_test_file(&r.path)) {
        return None;
    }
    let stems = stems(records, is_test_file, test_subject);
    Some(format!("add tests for {}", stems.join(", ")))
}

fn route_phrase(records: &[ChangeRecord]) -> Option<String> {
    let touches_routes = records.iter().any(|r| {
        r.path.contains("/routes/") || r.added_lines.join(" ").contains(ROUTER_USAGE)
    });

    (touches_routes && records.len() > 1).then(|| ROUTE_MOVE_PHRASE.to_string())
}

/// Non-empty stems of matching records, in diff order.
fn stems<'a>(
    records: &'a [ChangeRecord],
    pred: fn(&str) -> bool,
    stem: fn(&'a str) -> &'a str,
) -> Vec<&'a str> {
    records
        .iter()
        .filter(|r| pred(&r.path))
        .map(|r| stem(r.path.as_str()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// `src/user.test.ts` -> `user`.
fn test_subject(path: &str) -> &str {
    let stem = file_stem(path);
    stem.strip_suffix(".test")
        .or_else(|| stem.strip_suffix(".spec"))
        .unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, added: &[&str]) -> ChangeRecord {
        ChangeRecord {
            path: path.to_string(),
            added_lines: added.iter().map(|s| s.to_string()).collect(),
            ..ChangeRecord::default()
        }
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(describe(&[]), "update code");
    }

    #[test]
    fn test_docs() {
        assert_eq!(describe(&[record("docs/intro.md", &[])]), "add intro documentation");
        assert_eq!(
            describe(&[record("README.md", &[]), record("guide/docs/setup.txt", &[])]),
            "add README, setup documentation"
        );
    }

    #[test]
    fn test_tests() {
        assert_eq!(
            describe(&[record("tests/foo.test.ts", &[]), record("src/bar.spec.js", &[])]),
            "add tests for foo, bar"
        );
        assert_eq!(
            describe(&[record("app/tests/helpers.py", &[])]),
            "add tests for helpers"
        );
    }

    #[test]
    fn test_phrases_are_additive() {
        let set = vec![record("docs/api.md", &[]), record("src/api.test.ts", &[])];
        assert_eq!(
            describe(&set),
            "add api documentation and add tests for api"
        );
    }

    #[test]
    fn test_route_move() {
        let set = vec![
            record("src/server.js", &["app.use('/users', users);"]),
            record("src/users.js", &["router.get('/', list);"]),
        ];
        assert_eq!(describe(&set), "move API routes to dedicated module");
    }

    #[test]
    fn test_single_route_file_is_not_a_move() {
        let set = vec![record("src/routes/users.js", &["router.get('/', list);"])];
        assert_eq!(describe(&set), "update code");
    }

    #[test]
    fn test_plain_source_change() {
        let set = vec![record("src/main.rs", &["fn main() {}"])];
        assert_eq!(describe(&set), "update code");
    }
}
