// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use cmg::analysis::{classify_diff, heuristic_message, parse_diff, ChangeRecord};
use cmg::commit::Classification;
use cmg::config::CommitType;
use proptest::prelude::*;

fn file(path: &str, added: &[&str], removed: &[&str]) -> String {
    ChangeRecord {
        path: path.to_string(),
        added_lines: added.iter().map(|s| s.to_string()).collect(),
        removed_lines: removed.iter().map(|s| s.to_string()).collect(),
        context_lines: Vec::new(),
    }
    .to_diff_text()
}

#[test]
fn empty_diff_is_chore() {
    assert_eq!(heuristic_message(""), "chore: update code");
}

#[test]
fn markdown_only_is_docs() {
    let diff = file("docs/intro.md", &["# Intro", "Welcome."], &[]);
    let c = classify_diff(&diff);
    assert_eq!(c.commit_type, CommitType::Docs);
    assert_eq!(c.scope.as_deref(), Some("docs"));
    assert_eq!(c.description, "add intro documentation");
}

#[test]
fn api_additions_are_feat() {
    let diff = format!(
        "{}{}",
        file(
            "src/api/users.ts",
            &["export const list = () => db.users();", "export const one = id => db.user(id);", "export default list;"],
            &["export {};"],
        ),
        file("src/api/auth.ts", &["export const login = creds => session(creds);"], &[]),
    );
    let c = classify_diff(&diff);
    assert_eq!(c.commit_type, CommitType::Feat);
    assert_eq!(c.scope.as_deref(), Some("api"));
    assert!(heuristic_message(&diff).starts_with("feat(api): "));
}

#[test]
fn test_files_are_test_regardless_of_ratio() {
    for (added, removed) in [(vec!["a", "b", "c"], vec![]), (vec![], vec!["a", "b", "c"])] {
        let diff = file("tests/foo.test.ts", &added, &removed);
        let c = classify_diff(&diff);
        assert_eq!(c.commit_type, CommitType::Test);
        assert_eq!(c.scope.as_deref(), Some("tests"));
    }
}

#[test]
fn record_order_does_not_matter() {
    let a = file("src/api/users.ts", &["one", "two", "three"], &[]);
    let b = file("src/api/auth.ts", &["four"], &[]);
    assert_eq!(
        heuristic_message(&format!("{}{}", a, b)),
        heuristic_message(&format!("{}{}", b, a))
    );
}

#[test]
fn reserialized_records_parse_equal() {
    let diff = format!(
        "{}{}",
        file("src/lib.rs", &["pub mod x;"], &["mod x;"]),
        file("README.md", &["# Title"], &[])
    );
    let records = parse_diff(&diff);
    let again: String = records.iter().map(ChangeRecord::to_diff_text).collect();
    assert_eq!(parse_diff(&again), records);
}

fn diff_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z/]{1,20}\\.(rs|ts|md|css|json)".prop_map(|p| format!("diff --git a/{} b/{}", p, p)),
        "[ -~]{0,40}".prop_map(|s| format!("+{}", s)),
        "[ -~]{0,40}".prop_map(|s| format!("-{}", s)),
        "[ -~]{0,40}".prop_map(|s| format!(" {}", s)),
        "[ -~]{0,40}",
    ]
}

/// A trimmed line, often starting with characters that look like diff prefixes.
fn record_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "(\\+\\+|--|\\+|-| )?[!-~]([ -~]{0,20}[!-~])?".prop_map(|s| s.trim().to_string()),
    ]
}

fn record() -> impl Strategy<Value = ChangeRecord> {
    (
        "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.[a-z]{1,3}",
        prop::collection::vec(record_line(), 0..6),
        prop::collection::vec(record_line(), 0..6),
        prop::collection::vec(record_line(), 0..6),
    )
        .prop_map(|(path, added_lines, removed_lines, context_lines)| ChangeRecord {
            path,
            added_lines,
            removed_lines,
            context_lines,
        })
}

proptest! {
    #[test]
    fn prop_reserialized_records_parse_equal(records in prop::collection::vec(record(), 0..5)) {
        let text: String = records.iter().map(ChangeRecord::to_diff_text).collect();
        prop_assert_eq!(parse_diff(&text), records);
    }

    #[test]
    fn prop_any_text_gives_wellformed_message(text in "\\PC{0,300}") {
        let message = heuristic_message(&text);
        prop_assert!(!message.is_empty());
        prop_assert!(Classification::parse(&message).is_some(), "malformed: {:?}", message);
    }

    #[test]
    fn prop_diff_shaped_text_gives_wellformed_message(
        lines in prop::collection::vec(diff_line(), 0..40)
    ) {
        let message = heuristic_message(&lines.join("\n"));
        prop_assert!(Classification::parse(&message).is_some(), "malformed: {:?}", message);
    }
}
